//! WebSocket transport: one writer task draining outbound requests, one reader
//! task forwarding decoded inbound messages in arrival order.

use futures::{SinkExt, StreamExt};
use shared::protocol::{ClientRequest, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::{controller::RequestSink, error::TransportError};

/// Cloneable handle for queuing requests onto the socket writer.
#[derive(Debug, Clone)]
pub struct WsSender {
    frames: mpsc::UnboundedSender<String>,
}

impl RequestSink for WsSender {
    fn send(&self, request: &ClientRequest) -> Result<(), TransportError> {
        let text = serde_json::to_string(request).map_err(|source| TransportError::Encode {
            kind: request.kind(),
            source,
        })?;
        self.frames.send(text).map_err(|_| TransportError::Closed)
    }
}

/// Builds the socket endpoint, replacing any `app_id` already in the query.
pub fn endpoint_url(base: &str, app_id: Option<&str>) -> Result<Url, TransportError> {
    let mut url = Url::parse(base).map_err(|source| TransportError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
    }

    if let Some(app_id) = app_id {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "app_id")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair("app_id", app_id);
    }
    Ok(url)
}

pub async fn connect(
    url: &Url,
) -> Result<(WsSender, mpsc::UnboundedReceiver<ServerEvent>), TransportError> {
    let (ws_stream, _) = connect_async(url.as_str())
        .await
        .map_err(|source| TransportError::Connect {
            url: url.to_string(),
            source,
        })?;
    info!(url = %url, "websocket connected");
    let (mut ws_writer, mut ws_reader) = ws_stream.split();

    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<String>();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(text) = frame_rx.recv().await {
            if let Err(err) = ws_writer.send(Message::Text(text)).await {
                warn!(error = %err, "websocket send failed");
                return;
            }
        }
        let _ = ws_writer.close().await;
    });

    tokio::spawn(async move {
        while let Some(msg) = ws_reader.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let event = ServerEvent::decode(&text);
                    debug!(kind = event.kind(), "websocket message received");
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Message::Close(frame)) => {
                    info!(?frame, "websocket closed by peer");
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "websocket receive failed");
                    break;
                }
            }
        }
    });

    Ok((WsSender { frames: frame_tx }, event_rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_app_id() {
        let url = endpoint_url("wss://ws.binaryws.com/websockets/v3", Some("1089")).expect("url");
        assert_eq!(url.as_str(), "wss://ws.binaryws.com/websockets/v3?app_id=1089");
    }

    #[test]
    fn endpoint_replaces_existing_app_id_and_keeps_other_params() {
        let url = endpoint_url("ws://localhost:9000/ws?l=EN&app_id=1", Some("1089")).expect("url");
        assert_eq!(url.as_str(), "ws://localhost:9000/ws?l=EN&app_id=1089");
    }

    #[test]
    fn endpoint_without_app_id_is_untouched() {
        let url = endpoint_url("ws://localhost:9000/ws", None).expect("url");
        assert_eq!(url.as_str(), "ws://localhost:9000/ws");
    }

    #[test]
    fn endpoint_rejects_http_and_garbage() {
        assert!(matches!(
            endpoint_url("https://example.com", None),
            Err(TransportError::UnsupportedScheme(scheme)) if scheme == "https"
        ));
        assert!(matches!(
            endpoint_url("not a url", None),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn sender_reports_closed_channel() {
        let (frames, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sender = WsSender { frames };
        assert!(matches!(
            sender.send(&ClientRequest::ResidenceList),
            Err(TransportError::Closed)
        ));
    }

    #[test]
    fn sender_queues_json_frames() {
        let (frames, mut rx) = mpsc::unbounded_channel();
        let sender = WsSender { frames };
        sender
            .send(&ClientRequest::payment_methods("id"))
            .expect("queue request");
        assert_eq!(
            rx.try_recv().expect("frame"),
            r#"{"payment_methods":1,"residence":"id"}"#
        );
    }
}
