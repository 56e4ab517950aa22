use {
    crate::body::BodyFrame,
    flume::{Receiver, TryRecvError},
};

/// Producer of body snapshots.
///
/// Polled once per tick. Must not block:
/// `None` means there is nothing to show this tick.
pub trait BodySource {
    fn fetch(&mut self) -> Option<BodyFrame>;
}

impl<F> BodySource for F
where
    F: FnMut() -> Option<BodyFrame>,
{
    fn fetch(&mut self) -> Option<BodyFrame> {
        self()
    }
}

/// Source fed through a channel, typically by a sensor thread.
///
/// Yields the newest frame received since previous fetch,
/// older frames are dropped.
pub struct ChannelSource {
    frames: Receiver<BodyFrame>,
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(frames: Receiver<BodyFrame>) -> Self {
        ChannelSource {
            frames,
            disconnected: false,
        }
    }
}

impl BodySource for ChannelSource {
    fn fetch(&mut self) -> Option<BodyFrame> {
        let mut latest = None;
        loop {
            match self.frames.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        tracing::warn!("Body source disconnected");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::body::{Body, TrackingId},
    };

    #[test]
    fn channel_yields_latest_frame() {
        let (tx, rx) = flume::unbounded();
        let mut source = ChannelSource::new(rx);

        assert_eq!(source.fetch(), None);

        tx.send(BodyFrame::default()).unwrap();
        let latest: BodyFrame =
            Some(Body::at_origin(TrackingId(5), true)).into_iter().collect();
        tx.send(latest.clone()).unwrap();

        assert_eq!(source.fetch(), Some(latest));
        assert_eq!(source.fetch(), None);

        drop(tx);
        assert_eq!(source.fetch(), None);
    }
}
