//! Timed streaming of simulated readings
//!
//! Paces an [`EmgSimulator`] on a tokio interval and delivers fixed-length
//! chunks over an mpsc channel, the way a band pushes samples while a side
//! is being recorded.

use crate::emg_simulator::{EmgConfig, EmgSimulator};
use mb_core::{MbError, MbResult};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, trace};

/// Configuration for a recording stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Channel simulation configuration
    pub emg_config: EmgConfig,
    /// Total recording length in seconds
    pub duration: f64,
    /// Chunk duration in seconds (e.g. 0.1 for 100ms chunks)
    pub chunk_duration: f64,
    /// Chunks buffered in the channel before the producer waits
    pub buffer_size: usize,
    /// Chunks delivered per second of wall time
    pub update_rate: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            emg_config: EmgConfig::default(),
            duration: 3.0,
            chunk_duration: 0.1, // 100ms chunks
            buffer_size: 32,
            update_rate: 10.0, // real time
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> MbResult<()> {
        if !is_positive(self.duration) || !is_positive(self.chunk_duration) {
            return Err(MbError::SimulationError {
                message: "duration and chunk duration must be positive".to_string(),
            });
        }
        if self.buffer_size == 0 {
            return Err(MbError::SimulationError {
                message: "buffer size must be greater than 0".to_string(),
            });
        }
        if !is_positive(self.update_rate) {
            return Err(MbError::SimulationError {
                message: "update rate must be positive".to_string(),
            });
        }
        self.emg_config.validate()?;

        if self.samples_per_chunk() == 0 || self.total_samples() == 0 {
            return Err(MbError::SimulationError {
                message: format!(
                    "{}s chunks over {}s hold no samples at {}Hz",
                    self.chunk_duration, self.duration, self.emg_config.sampling_rate
                ),
            });
        }
        Ok(())
    }

    /// Samples generated for the whole recording
    pub fn total_samples(&self) -> usize {
        (self.duration * self.emg_config.sampling_rate).round().max(0.0) as usize
    }

    /// Samples in every chunk but possibly the last
    pub fn samples_per_chunk(&self) -> usize {
        (self.chunk_duration * self.emg_config.sampling_rate).round().max(0.0) as usize
    }

    /// Number of chunks needed to cover the duration
    pub fn chunk_count(&self) -> usize {
        match self.samples_per_chunk() {
            0 => 0,
            per_chunk => self.total_samples().div_ceil(per_chunk),
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Stream statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamStats {
    pub chunks_sent: usize,
    pub samples_sent: usize,
    /// Seconds of signal delivered
    pub signal_duration: f64,
    /// Wall time spent streaming, in seconds
    pub wall_time: f64,
    /// Receiver went away before the recording finished
    pub cancelled: bool,
}

/// Simulated recording that can be spawned onto the tokio runtime
pub struct ReadingStream {
    config: StreamConfig,
    simulator: EmgSimulator,
}

impl ReadingStream {
    /// Create new stream with its own simulator
    pub fn new(config: StreamConfig) -> MbResult<Self> {
        config.validate()?;
        let simulator = EmgSimulator::new(config.emg_config.clone())?;
        Ok(ReadingStream { config, simulator })
    }

    /// Create a stream around an existing simulator (e.g. one side of a
    /// [`BilateralSimulator`](crate::BilateralSimulator))
    pub fn with_simulator(config: StreamConfig, simulator: EmgSimulator) -> MbResult<Self> {
        config.validate()?;
        Ok(ReadingStream { config, simulator })
    }

    /// Spawn the producer task. Chunks arrive on the returned receiver, which
    /// closes when the recording is finished.
    pub fn spawn(self) -> (mpsc::Receiver<Vec<f64>>, JoinHandle<StreamStats>) {
        let (sender, receiver) = mpsc::channel(self.config.buffer_size);
        let handle = tokio::spawn(self.run(sender));
        (receiver, handle)
    }

    /// Produce every chunk into `sender`, pacing on the update rate
    pub async fn run(mut self, sender: mpsc::Sender<Vec<f64>>) -> StreamStats {
        let mut ticker = interval(Duration::from_secs_f64(1.0 / self.config.update_rate));
        let started = Instant::now();
        let mut stats = StreamStats::default();
        let total = self.config.total_samples();
        let per_chunk = self.config.samples_per_chunk();

        debug!(
            chunks = self.config.chunk_count(),
            samples = total,
            duration = self.config.duration,
            "stream started"
        );
        while stats.samples_sent < total {
            ticker.tick().await;

            let index = stats.chunks_sent;
            let chunk = self.simulator.generate_samples(per_chunk.min(total - stats.samples_sent));
            let len = chunk.len();

            if sender.send(chunk).await.is_err() {
                debug!(chunk = index, "receiver dropped, stopping stream");
                stats.cancelled = true;
                break;
            }

            trace!(chunk = index, samples = len, "chunk sent");
            stats.chunks_sent += 1;
            stats.samples_sent += len;
        }

        stats.signal_duration = self.simulator.elapsed();
        stats.wall_time = started.elapsed().as_secs_f64();
        debug!(?stats, "stream finished");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_patterns::SignalPattern;

    fn fast_config() -> StreamConfig {
        StreamConfig {
            emg_config: EmgConfig {
                pattern: SignalPattern::Constant { level: 0.5 },
                noise_std: 0.0,
                seed: Some(1),
                ..EmgConfig::default()
            },
            duration: 0.5,
            chunk_duration: 0.1,
            buffer_size: 4,
            update_rate: 500.0,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(StreamConfig::default().validate().is_ok());
        assert!(StreamConfig { duration: 0.0, ..StreamConfig::default() }.validate().is_err());
        assert!(StreamConfig { buffer_size: 0, ..StreamConfig::default() }.validate().is_err());
        assert!(StreamConfig { update_rate: f64::NAN, ..StreamConfig::default() }.validate().is_err());
    }

    #[test]
    fn test_chunk_count_rounds_up() {
        let config = StreamConfig { duration: 0.25, chunk_duration: 0.1, ..fast_config() };
        assert_eq!(config.chunk_count(), 3);
    }

    #[test]
    fn test_chunk_shorter_than_sample_rejected() {
        let mut config = fast_config();
        config.emg_config.sampling_rate = 4.0;
        assert_eq!(config.samples_per_chunk(), 0);
        assert!(matches!(config.validate(), Err(MbError::SimulationError { .. })));
        assert!(ReadingStream::new(config).is_err());
    }

    #[test]
    fn test_chunk_count_has_no_empty_tail() {
        let config = StreamConfig { duration: 1.1, ..fast_config() };
        assert_eq!(config.total_samples(), 110);
        assert_eq!(config.chunk_count(), 11);
    }

    async fn collect(config: StreamConfig) -> (Vec<Vec<f64>>, StreamStats) {
        let (mut receiver, handle) = ReadingStream::new(config).unwrap().spawn();
        let mut chunks = Vec::new();
        while let Some(chunk) = receiver.recv().await {
            chunks.push(chunk);
        }
        (chunks, handle.await.unwrap())
    }

    #[tokio::test]
    async fn test_low_sampling_rate_delivers_samples() {
        let mut config = StreamConfig { duration: 3.0, chunk_duration: 0.5, ..fast_config() };
        config.emg_config.sampling_rate = 4.0;

        let (chunks, stats) = collect(config).await;
        assert_eq!(stats.samples_sent, 12);
        assert_eq!(chunks.len(), 6);
        assert!(chunks.iter().all(|chunk| chunk.len() == 2));
        assert!((stats.signal_duration - 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_uneven_duration_ends_without_empty_chunk() {
        let config = StreamConfig { duration: 1.1, ..fast_config() };

        let (chunks, stats) = collect(config).await;
        assert_eq!(stats.chunks_sent, 11);
        assert_eq!(stats.samples_sent, 110);
        assert!(chunks.iter().all(|chunk| chunk.len() == 10));

        let config = StreamConfig { duration: 0.25, ..fast_config() };
        let (chunks, stats) = collect(config).await;
        assert_eq!(stats.samples_sent, 25);
        assert_eq!(chunks.last().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn test_stream_delivers_all_samples() {
        let (mut receiver, handle) = ReadingStream::new(fast_config()).unwrap().spawn();

        let mut readings = Vec::new();
        while let Some(chunk) = receiver.recv().await {
            readings.extend(chunk);
        }
        let stats = handle.await.unwrap();

        assert_eq!(stats.chunks_sent, 5);
        assert_eq!(stats.samples_sent, 50);
        assert_eq!(readings.len(), 50);
        assert!(!stats.cancelled);
        assert!(readings.iter().all(|&r| (r - 500.0).abs() < 1e-9));
    }

    #[tokio::test]
    async fn test_dropped_receiver_cancels() {
        let (mut receiver, handle) = ReadingStream::new(fast_config()).unwrap().spawn();
        assert!(receiver.recv().await.is_some());
        drop(receiver);

        let stats = handle.await.unwrap();
        assert!(stats.cancelled);
        assert!(stats.chunks_sent < 5);
    }
}
