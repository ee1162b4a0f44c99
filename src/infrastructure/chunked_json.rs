// Chunked NDJSON streaming of page snapshots
use crate::infrastructure::virtual_dom::{PageSnapshot, VirtualDom};
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use tokio::sync::watch;

/// One snapshot per line, terminated by `\n`
pub fn encode_line(snapshot: &PageSnapshot) -> Result<Bytes, serde_json::Error> {
    let json = serde_json::to_vec(snapshot)?;
    let mut chunk = BytesMut::with_capacity(json.len() + 1);
    chunk.put_slice(&json);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

/// Current snapshot first, then one per observed version change. Bursts of
/// mutations between two polls collapse into a single snapshot. The stream
/// ends once `closing` flips to true so graceful shutdown can complete.
pub fn snapshot_stream(
    page: VirtualDom,
    mut closing: watch::Receiver<bool>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let mut versions = page.subscribe();
    async_stream::stream! {
        loop {
            if *closing.borrow() {
                break;
            }
            versions.mark_unchanged();
            match encode_line(&page.snapshot()) {
                Ok(line) => yield Ok(line),
                Err(e) => {
                    tracing::error!("Snapshot serialization error: {}", e);
                    yield Err(std::io::Error::other(e));
                    break;
                }
            }
            tokio::select! {
                changed = versions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = closing.changed() => break,
            }
        }
    }
}

pub fn ndjson_response<S>(stream: S) -> Response<Body>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::page_surface::DomSurface;
    use crate::infrastructure::virtual_dom::LAST_UPDATED;
    use futures::StreamExt;

    fn version_of(line: &Bytes) -> u64 {
        assert_eq!(line.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&line[..line.len() - 1]).unwrap();
        value["version"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_stream_starts_with_current_snapshot() {
        let page = VirtualDom::with_dashboard_page();
        page.set_text(LAST_UPDATED, "earlier".to_string());

        let (_closing, open) = watch::channel(false);
        let mut stream = Box::pin(snapshot_stream(page.clone(), open));
        let first = stream.next().await.unwrap().unwrap();

        assert_eq!(version_of(&first), 1);
    }

    #[tokio::test]
    async fn test_stream_follows_changes_and_coalesces() {
        let page = VirtualDom::with_dashboard_page();
        let (_closing, open) = watch::channel(false);
        let mut stream = Box::pin(snapshot_stream(page.clone(), open));
        assert_eq!(version_of(&stream.next().await.unwrap().unwrap()), 0);

        page.set_text(LAST_UPDATED, "a".to_string());
        page.set_text(LAST_UPDATED, "b".to_string());
        page.set_text(LAST_UPDATED, "c".to_string());

        let next = stream.next().await.unwrap().unwrap();
        assert_eq!(version_of(&next), 3);
    }

    #[tokio::test]
    async fn test_stream_ends_on_shutdown() {
        let page = VirtualDom::with_dashboard_page();
        let (closing, open) = watch::channel(false);
        let mut stream = Box::pin(snapshot_stream(page, open));
        assert!(stream.next().await.is_some());

        closing.send_replace(true);

        assert!(stream.next().await.is_none());
    }
}
