//! Background pump turning terminal input into an async stream.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::{Event, EventDispatcher};

/// Stream of terminal events fed by a blocking reader task.
pub struct EventHandler {
    events: UnboundedReceiverStream<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = Arc::clone(&stop);

        tokio::task::spawn_blocking(move || {
            let dispatcher = EventDispatcher::new().with_tick_rate(tick_rate);
            while !stopped.load(Ordering::Relaxed) {
                match dispatcher.next() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!("terminal event error: {}", err);
                        std::thread::sleep(Duration::from_millis(10));
                    }
                }
            }
        });

        Self {
            events: UnboundedReceiverStream::new(rx),
            stop,
        }
    }

    /// Build a handler over an existing channel, with no terminal reader.
    pub fn from_channel(rx: mpsc::UnboundedReceiver<Event>) -> Self {
        Self {
            events: UnboundedReceiverStream::new(rx),
            stop: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Stream for EventHandler {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn forwards_channel_events() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut handler = EventHandler::from_channel(rx);

        tx.send(Event::Resize(100, 40)).unwrap();
        tx.send(Event::Tick).unwrap();
        drop(tx);

        assert!(matches!(handler.next().await, Some(Event::Resize(100, 40))));
        assert!(matches!(handler.next().await, Some(Event::Tick)));
        assert!(handler.next().await.is_none());
    }
}
