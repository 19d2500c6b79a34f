//! Cyclic executive.
//!
//! Single non-preemptive main loop. Each `poll()` pass runs four
//! phases in a fixed order:
//!
//! 1. Timebase: on a 1 ms tick, feed the watchdog and classify the
//!    button input.
//! 2. Transmit production: generate at most one modem sample and push
//!    it into the TX ring under an interrupt-mask bracket.
//! 3. Receive consumption: pop at most one captured sample, run it
//!    through the demodulator chain, and return any decoded byte.
//! 4. Indicator effects.
//!
//! The only shared state with the transport interrupt is the pair of
//! sample rings; every ring operation here is bracketed by
//! `mask_interrupts`/`unmask_interrupts` and nothing else runs masked.

use crate::board::{DigitalInput, InterruptMask, StatusIndicator, TickSource};
use crate::config::{FEED_COMPLEMENT, FEED_PATTERN, STATUS_MESSAGE};
use crate::debounce::{Press, PressClassifier};
use crate::indicator::{BlinkState, BreathState, StatusColor};
use crate::logging::LogStream;
use crate::modem::{BitSampler, FskDemodulator, FskModulator, UartDecoder};
use crate::ring::RingBuffer;
use crate::watchdog::WatchdogMonitor;
use crate::{rt_error, rt_info};

/// All main-loop state: press counter, modem chains, effects.
pub struct Executive {
    classifier: PressClassifier,
    counter: u8,
    modulator: FskModulator,
    demodulator: FskDemodulator,
    sampler: BitSampler,
    decoder: UartDecoder,
    breath: BreathState,
    blink: BlinkState,
    /// Sample generated but not yet accepted by the TX ring.
    pending: Option<i16>,
    ticks: u32,
}

impl Executive {
    pub fn new() -> Self {
        Self {
            classifier: PressClassifier::new(),
            counter: 0,
            modulator: FskModulator::new(),
            demodulator: FskDemodulator::new(),
            sampler: BitSampler::new(),
            decoder: UartDecoder::new(),
            breath: BreathState::new(),
            blink: BlinkState::new(),
            pending: None,
            ticks: 0,
        }
    }

    /// Press counter value (0..=7).
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Elapsed 1 ms ticks.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Queue bytes for transmission; returns how many fit.
    pub fn queue_message(&mut self, bytes: &[u8]) -> usize {
        self.modulator.queue_message(bytes)
    }

    /// Run one pass of the main loop.
    ///
    /// Returns a decoded byte when one completes this pass.
    pub fn poll<B, const TN: usize, const RN: usize>(
        &mut self,
        board: &mut B,
        tx: &mut RingBuffer<i16, TN>,
        rx: &mut RingBuffer<i16, RN>,
        watchdog: &mut WatchdogMonitor,
        log: &LogStream,
    ) -> Option<u8>
    where
        B: DigitalInput + StatusIndicator + TickSource + InterruptMask,
    {
        if board.tick_elapsed() {
            self.ticks = self.ticks.wrapping_add(1);
            watchdog.feed(FEED_PATTERN, FEED_COMPLEMENT);

            let level = board.read_button();
            match self.classifier.classify(level, false) {
                Press::Short => {
                    self.counter = (self.counter + 1) & 7;
                    let queued = self.modulator.queue_message(STATUS_MESSAGE);
                    rt_info!(
                        log,
                        self.ticks,
                        "short press: counter={} queued={}",
                        self.counter,
                        queued
                    );
                }
                Press::Long => {
                    self.counter = 0;
                    rt_info!(log, self.ticks, "long press: counter cleared");
                }
                Press::None => {}
            }

            match StatusColor::from_index(self.counter) {
                Ok(color) => board.set_color(color),
                Err(err) => {
                    rt_error!(log, self.ticks, "indicator: {}", err);
                }
            }
        }

        // Transmit production with backpressure: a sample refused by a
        // full ring stays pending, no sample is ever generated twice
        // or dropped.
        let sample = match self.pending.take() {
            Some(sample) => sample,
            None => self.modulator.next_sample(),
        };
        board.mask_interrupts();
        let pushed = tx.push(sample);
        board.unmask_interrupts();
        if pushed.is_err() {
            self.pending = Some(sample);
        }

        // Receive consumption
        board.mask_interrupts();
        let captured = rx.pop();
        board.unmask_interrupts();
        let mut decoded = None;
        if let Ok(sample) = captured {
            let raw_bit = self.demodulator.process(sample);
            if let Some(bit) = self.sampler.push(raw_bit) {
                decoded = self.decoder.process(bit);
            }
        }

        // Activity channel blinks while a frame is in flight, breathes
        // when the line is idle
        let activity = if self.modulator.is_idle() {
            self.blink = BlinkState::new();
            self.breath.step()
        } else {
            self.blink.step()
        };
        board.set_activity(activity);

        decoded
    }
}

impl Default for Executive {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CODEC_QUEUE_LEN, LONG_PRESS_TICKS, TX_PREFILL};
    use crate::sim::SimBoard;

    fn rings() -> (
        RingBuffer<i16, CODEC_QUEUE_LEN>,
        RingBuffer<i16, CODEC_QUEUE_LEN>,
    ) {
        (RingBuffer::new(TX_PREFILL, 0), RingBuffer::new(0, 0))
    }

    fn press(
        exec: &mut Executive,
        board: &mut SimBoard,
        tx: &mut RingBuffer<i16, CODEC_QUEUE_LEN>,
        rx: &mut RingBuffer<i16, CODEC_QUEUE_LEN>,
        wd: &mut WatchdogMonitor,
        log: &LogStream,
        hold_ticks: u32,
    ) {
        for _ in 0..hold_ticks {
            board.button = true;
            board.tick_flag = true;
            exec.poll(board, tx, rx, wd, log);
            // Drain so the TX ring never backs up during the hold
            let _ = tx.pop();
        }
        board.button = false;
        board.tick_flag = true;
        exec.poll(board, tx, rx, wd, log);
        let _ = tx.pop();
    }

    #[test]
    fn test_short_press_advances_counter_and_color() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();

        press(&mut exec, &mut board, &mut tx, &mut rx, &mut wd, &log, 150);
        assert_eq!(exec.counter(), 1);
        assert_eq!(board.color, StatusColor::Red);

        press(&mut exec, &mut board, &mut tx, &mut rx, &mut wd, &log, 150);
        assert_eq!(exec.counter(), 2);
        assert_eq!(board.color, StatusColor::Green);
    }

    #[test]
    fn test_counter_wraps_mod_8() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();

        for _ in 0..8 {
            press(&mut exec, &mut board, &mut tx, &mut rx, &mut wd, &log, 150);
        }
        assert_eq!(exec.counter(), 0);
        assert_eq!(board.color, StatusColor::Off);
    }

    #[test]
    fn test_long_press_clears_counter() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();

        press(&mut exec, &mut board, &mut tx, &mut rx, &mut wd, &log, 150);
        press(&mut exec, &mut board, &mut tx, &mut rx, &mut wd, &log, 150);
        assert_eq!(exec.counter(), 2);

        press(
            &mut exec,
            &mut board,
            &mut tx,
            &mut rx,
            &mut wd,
            &log,
            LONG_PRESS_TICKS + 10,
        );
        assert_eq!(exec.counter(), 0);
        assert_eq!(board.color, StatusColor::Off);
    }

    #[test]
    fn test_full_tx_ring_applies_backpressure() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();

        // Nobody drains: the ring fills and stays exactly full
        for _ in 0..50 {
            exec.poll(&mut board, &mut tx, &mut rx, &mut wd, &log);
        }
        assert!(tx.is_full());
        assert_eq!(tx.len(), CODEC_QUEUE_LEN - 1);
    }

    #[test]
    fn test_every_ring_op_is_bracketed() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();

        for _ in 0..20 {
            exec.poll(&mut board, &mut tx, &mut rx, &mut wd, &log);
        }
        assert_eq!(board.mask_depth, 0);
        assert_eq!(board.max_mask_depth, 1);
    }

    #[test]
    fn test_ticks_feed_the_watchdog() {
        let mut exec = Executive::new();
        let mut board = SimBoard::new();
        let (mut tx, mut rx) = rings();
        let mut wd = WatchdogMonitor::new();
        let log = LogStream::new();
        wd.configure(5, true);
        wd.start();

        for _ in 0..50 {
            board.tick_flag = true;
            exec.poll(&mut board, &mut tx, &mut rx, &mut wd, &log);
            let _ = tx.pop();
            assert_eq!(wd.tick(), None);
        }
    }
}
