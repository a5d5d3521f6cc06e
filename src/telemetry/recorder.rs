//! Multi-channel telemetry recording and export fan-out.
//!
//! [`TelemetryRecorder`] owns one [`SampleBuffer`] per configured
//! [`ChannelKind`]. Every telemetry event is fanned out to all channels with
//! the shared device timestamp, and the elapsed time since the previous event
//! is computed once per event, not per channel. After each append the live
//! display is notified through [`GraphObserver`].
//!
//! Export runs the [`Resampler`] over every channel and hands the
//! reconstructed waveform to an [`Exporter`] under a channel-qualified name
//! (`"{prefix}_{label}"`). One channel failing or being too short never
//! aborts its siblings.

use log::{debug, warn};

use crate::export::Exporter;
use crate::telemetry::channel::{AccelVector, ChannelKind};
use crate::telemetry::resample::Resampler;
use crate::telemetry::sample::{SampleBuffer, SampleError};

// ---------------------------------------------------------------------------
// GraphObserver
// ---------------------------------------------------------------------------

/// Live display collaborator, notified after every append.
///
/// Purely observational — implementations render the updated buffer (or
/// ignore the call) and feed nothing back into the recorder.
pub trait GraphObserver {
    /// `channel`'s buffer just received a new sample.
    fn graph_updated(&mut self, channel: &str, buffer: &SampleBuffer);
}

// ---------------------------------------------------------------------------
// TelemetryRecorder
// ---------------------------------------------------------------------------

/// One monitored channel: a label, its extractor kind and its sample log.
struct Channel {
    name: String,
    kind: ChannelKind,
    buffer: SampleBuffer,
}

/// Records die telemetry into per-channel sample logs and exports them as
/// fixed-rate waveforms.
pub struct TelemetryRecorder {
    channels: Vec<Channel>,
    /// Device timestamp of the most recent event, for delta-time computation.
    /// Deliberately *not* reset by [`clear`](Self::clear) — the device clock
    /// keeps running across recordings.
    last_sample_millis: u32,
    observer: Option<Box<dyn GraphObserver>>,
}

impl std::fmt::Debug for TelemetryRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryRecorder")
            .field("channels", &self.channels.len())
            .field("last_sample_millis", &self.last_sample_millis)
            .finish_non_exhaustive()
    }
}

impl TelemetryRecorder {
    /// Create a recorder with one channel per entry of `kinds`.
    pub fn new(kinds: &[ChannelKind]) -> Self {
        let channels = kinds
            .iter()
            .map(|&kind| Channel {
                name: kind.label().to_string(),
                kind,
                buffer: SampleBuffer::new(),
            })
            .collect();

        Self {
            channels,
            last_sample_millis: 0,
            observer: None,
        }
    }

    /// Attach the live display collaborator.
    pub fn set_observer(&mut self, observer: Box<dyn GraphObserver>) {
        self.observer = Some(observer);
    }

    /// Number of monitored channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample log of the first channel of the given kind, if configured.
    pub fn buffer(&self, kind: ChannelKind) -> Option<&SampleBuffer> {
        self.channels
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| &c.buffer)
    }

    /// Device timestamp of the most recent accepted event.
    pub fn last_sample_millis(&self) -> u32 {
        self.last_sample_millis
    }

    /// Fan a raw telemetry reading out to every channel.
    ///
    /// The delta time handed to the extractors is computed once from the
    /// previous event's timestamp. `last_sample_millis` is updated only after
    /// all channels have appended.
    ///
    /// # Errors
    ///
    /// [`SampleError::OutOfOrder`] when `millis` is earlier than the previous
    /// event. Rejected before any channel appends, so the channels never go
    /// out of lockstep.
    pub fn on_telemetry_received(
        &mut self,
        acc: AccelVector,
        millis: u32,
    ) -> Result<(), SampleError> {
        if millis < self.last_sample_millis {
            return Err(SampleError::OutOfOrder {
                last: self.last_sample_millis,
                got: millis,
            });
        }

        let delta_secs = (millis - self.last_sample_millis) as f32 / 1000.0;

        for channel in &mut self.channels {
            let value = channel.kind.extract(acc, delta_secs);
            channel.buffer.append(millis, value)?;

            if let Some(observer) = self.observer.as_deref_mut() {
                observer.graph_updated(&channel.name, &channel.buffer);
            }
        }

        self.last_sample_millis = millis;
        Ok(())
    }

    /// Clear every channel's sample log. Channel identity and the device
    /// clock tracking are untouched.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.buffer.clear();
        }
    }

    /// Resample every channel and hand the waveforms to `exporter` as
    /// `"{prefix}_{label}"`.
    ///
    /// Channels that cannot be reconstructed (fewer than two samples, or a
    /// zero recorded span) are skipped, and an exporter failure on one
    /// channel does not abort the remaining ones. Returns the number of
    /// channels actually written.
    pub fn export(
        &self,
        prefix: &str,
        resampler: &Resampler,
        exporter: &mut dyn Exporter,
    ) -> usize {
        let mut written = 0;

        for channel in &self.channels {
            let waveform = match resampler.run(&channel.buffer) {
                Ok(w) => w,
                Err(err) => {
                    debug!("skipping channel {}: {err}", channel.name);
                    continue;
                }
            };

            if waveform.is_empty() {
                debug!("skipping channel {}: zero recorded span", channel.name);
                continue;
            }

            let name = format!("{prefix}_{}", channel.name);
            match exporter.write(&name, &waveform, resampler.sample_rate_hz()) {
                Ok(()) => written += 1,
                Err(err) => warn!("export of {name} failed: {err}"),
            }
        }

        written
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::export::MockExporter;

    const XYZ: [ChannelKind; 3] = [ChannelKind::AxisX, ChannelKind::AxisY, ChannelKind::AxisZ];

    fn xyz_recorder() -> TelemetryRecorder {
        TelemetryRecorder::new(&XYZ)
    }

    // ---- Fan-out ------------------------------------------------------------

    #[test]
    fn event_fans_out_to_every_channel() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::new(1.0, 2.0, 3.0), 10)
            .unwrap();

        let x = recorder.buffer(ChannelKind::AxisX).unwrap();
        let y = recorder.buffer(ChannelKind::AxisY).unwrap();
        let z = recorder.buffer(ChannelKind::AxisZ).unwrap();

        assert_eq!(x.last().unwrap().value, 1.0);
        assert_eq!(y.last().unwrap().value, 2.0);
        assert_eq!(z.last().unwrap().value, 3.0);

        // Shared timestamp across all channels.
        for buf in [x, y, z] {
            assert_eq!(buf.len(), 1);
            assert_eq!(buf.last().unwrap().millis, 10);
        }
    }

    #[test]
    fn last_sample_millis_tracks_events() {
        let mut recorder = xyz_recorder();
        assert_eq!(recorder.last_sample_millis(), 0);

        recorder
            .on_telemetry_received(AccelVector::default(), 40)
            .unwrap();
        assert_eq!(recorder.last_sample_millis(), 40);

        recorder
            .on_telemetry_received(AccelVector::default(), 90)
            .unwrap();
        assert_eq!(recorder.last_sample_millis(), 90);
    }

    #[test]
    fn out_of_order_event_rejected_before_any_append() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::default(), 100)
            .unwrap();

        let err = recorder
            .on_telemetry_received(AccelVector::default(), 50)
            .unwrap_err();
        assert_eq!(err, SampleError::OutOfOrder { last: 100, got: 50 });

        // No channel saw a partial append.
        for kind in XYZ {
            assert_eq!(recorder.buffer(kind).unwrap().len(), 1);
        }
        assert_eq!(recorder.last_sample_millis(), 100);
    }

    #[test]
    fn repeated_timestamp_is_accepted() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::default(), 100)
            .unwrap();
        recorder
            .on_telemetry_received(AccelVector::default(), 100)
            .unwrap();

        assert_eq!(recorder.buffer(ChannelKind::AxisX).unwrap().len(), 2);
    }

    // ---- Clear --------------------------------------------------------------

    #[test]
    fn clear_empties_all_channels() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::new(1.0, 1.0, 1.0), 10)
            .unwrap();
        recorder.clear();

        for kind in XYZ {
            assert!(recorder.buffer(kind).unwrap().is_empty());
        }
        // Device clock tracking survives the clear.
        assert_eq!(recorder.last_sample_millis(), 10);
    }

    // ---- Observer notification ----------------------------------------------

    struct RecordingObserver {
        events: Rc<RefCell<Vec<(String, usize)>>>,
    }

    impl GraphObserver for RecordingObserver {
        fn graph_updated(&mut self, channel: &str, buffer: &SampleBuffer) {
            self.events
                .borrow_mut()
                .push((channel.to_string(), buffer.len()));
        }
    }

    #[test]
    fn observer_notified_after_each_append() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut recorder = xyz_recorder();
        recorder.set_observer(Box::new(RecordingObserver {
            events: Rc::clone(&events),
        }));

        recorder
            .on_telemetry_received(AccelVector::default(), 5)
            .unwrap();
        recorder
            .on_telemetry_received(AccelVector::default(), 15)
            .unwrap();

        let seen = events.borrow();
        assert_eq!(
            *seen,
            vec![
                ("X".to_string(), 1),
                ("Y".to_string(), 1),
                ("Z".to_string(), 1),
                ("X".to_string(), 2),
                ("Y".to_string(), 2),
                ("Z".to_string(), 2),
            ]
        );
    }

    // ---- Export -------------------------------------------------------------

    fn feed_ramp(recorder: &mut TelemetryRecorder) {
        recorder
            .on_telemetry_received(AccelVector::new(0.0, 1.0, -1.0), 0)
            .unwrap();
        recorder
            .on_telemetry_received(AccelVector::new(2.0, 3.0, -3.0), 1_000)
            .unwrap();
    }

    #[test]
    fn export_writes_all_channels_with_qualified_names() {
        let mut recorder = xyz_recorder();
        feed_ramp(&mut recorder);

        let resampler = Resampler::new(10, 1.0).unwrap();
        let mut exporter = MockExporter::new();
        let written = recorder.export("roll", &resampler, &mut exporter);

        assert_eq!(written, 3);
        let names: Vec<&str> = exporter.calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["roll_X", "roll_Y", "roll_Z"]);
        for call in &exporter.calls {
            assert_eq!(call.sample_rate_hz, 10);
            assert_eq!(call.samples.len(), 10);
        }
    }

    #[test]
    fn export_payload_matches_resampler_output() {
        let mut recorder = xyz_recorder();
        feed_ramp(&mut recorder);

        let resampler = Resampler::new(10, 2.0).unwrap();
        let mut exporter = MockExporter::new();
        recorder.export("roll", &resampler, &mut exporter);

        let expected = resampler
            .run(recorder.buffer(ChannelKind::AxisY).unwrap())
            .unwrap();
        assert_eq!(exporter.calls[1].samples, expected);
    }

    #[test]
    fn export_with_single_sample_is_skipped_not_failed() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::default(), 0)
            .unwrap();

        let resampler = Resampler::new(10, 1.0).unwrap();
        let mut exporter = MockExporter::new();
        assert_eq!(recorder.export("roll", &resampler, &mut exporter), 0);
        assert!(exporter.calls.is_empty());
    }

    #[test]
    fn underfilled_channel_does_not_abort_siblings() {
        let mut recorder = xyz_recorder();
        feed_ramp(&mut recorder);

        // Host cleared one graph; its log now holds a single sample while the
        // siblings still hold the full recording.
        recorder.channels[1].buffer.clear();
        recorder.channels[1].buffer.append(0, 0.5).unwrap();

        let resampler = Resampler::new(10, 1.0).unwrap();
        let mut exporter = MockExporter::new();
        let written = recorder.export("roll", &resampler, &mut exporter);

        assert_eq!(written, 2);
        let names: Vec<&str> = exporter.calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["roll_X", "roll_Z"]);
    }

    #[test]
    fn exporter_failure_on_one_channel_is_isolated() {
        let mut recorder = xyz_recorder();
        feed_ramp(&mut recorder);

        let resampler = Resampler::new(10, 1.0).unwrap();
        let mut exporter = MockExporter::failing_for("roll_Y");
        let written = recorder.export("roll", &resampler, &mut exporter);

        assert_eq!(written, 2);
        let names: Vec<&str> = exporter.calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["roll_X", "roll_Z"]);
    }

    #[test]
    fn zero_span_recording_exports_nothing() {
        let mut recorder = xyz_recorder();
        recorder
            .on_telemetry_received(AccelVector::new(1.0, 1.0, 1.0), 500)
            .unwrap();
        recorder
            .on_telemetry_received(AccelVector::new(2.0, 2.0, 2.0), 500)
            .unwrap();

        let resampler = Resampler::new(8_000, 1.0).unwrap();
        let mut exporter = MockExporter::new();
        assert_eq!(recorder.export("roll", &resampler, &mut exporter), 0);
    }

    #[test]
    fn clear_then_rerecord_matches_fresh_recorder() {
        let resampler = Resampler::new(10, 1.0).unwrap();

        let mut fresh = xyz_recorder();
        feed_ramp(&mut fresh);

        let mut reused = xyz_recorder();
        reused
            .on_telemetry_received(AccelVector::new(9.0, 9.0, 9.0), 0)
            .unwrap();
        reused.clear();
        feed_ramp(&mut reused);

        let mut a = MockExporter::new();
        let mut b = MockExporter::new();
        fresh.export("roll", &resampler, &mut a);
        reused.export("roll", &resampler, &mut b);

        assert_eq!(a.calls.len(), b.calls.len());
        for (x, y) in a.calls.iter().zip(b.calls.iter()) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.samples, y.samples);
        }
    }
}
