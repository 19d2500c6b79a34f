//! Host loopback demo.
//!
//! Runs the full stack against the simulated board: the codec output
//! is looped back into the input, a short press is injected, and the
//! status message comes out of the demodulator a few thousand frames
//! later. Useful for eyeballing end-to-end behavior without hardware.

use fsk_audio_modem::config::{CODEC_QUEUE_LEN, SAMPLE_RATE_HZ, TX_PREFILL};
use fsk_audio_modem::executive::Executive;
use fsk_audio_modem::fault::FaultState;
use fsk_audio_modem::logging::LogStream;
use fsk_audio_modem::ring::RingBuffer;
use fsk_audio_modem::sim::{LoopbackCodec, SimBoard};
use fsk_audio_modem::transport::service_codec;
use fsk_audio_modem::watchdog::WatchdogMonitor;

fn main() {
    let mut codec = LoopbackCodec::new();
    let mut board = SimBoard::new();
    let mut tx: RingBuffer<i16, CODEC_QUEUE_LEN> = RingBuffer::new(TX_PREFILL, 0);
    let mut rx: RingBuffer<i16, CODEC_QUEUE_LEN> = RingBuffer::new(0, 0);
    let mut exec = Executive::new();
    let mut watchdog = WatchdogMonitor::new();
    let fault = FaultState::new();
    let log = LogStream::new();

    watchdog.start();

    // Simulate one second of frames. Ticks fire every 48 frames (1 ms);
    // the button is held from 10 ms to 160 ms, a clean short press.
    let frames = SAMPLE_RATE_HZ;
    let mut decoded = Vec::new();

    for frame in 0..frames {
        let ms = frame / 48;
        board.button = ms >= 10 && ms < 160;
        board.tick_flag = frame % 48 == 0;

        codec.frame_tick();
        if let Err(code) = service_codec(&mut codec, &mut tx, &mut rx, &fault) {
            eprintln!("transport fault at frame {frame}: {code:?}");
            break;
        }

        if let Some(byte) = exec.poll(&mut board, &mut tx, &mut rx, &mut watchdog, &log) {
            decoded.push(byte);
        }

        if frame % 48 == 0 && watchdog.tick().is_some() {
            eprintln!("watchdog expired at frame {frame}");
            break;
        }
    }

    while let Some(entry) = log.drain() {
        let msg = String::from_utf8_lossy(&entry.msg[..entry.len as usize]);
        println!("[{:>6} ms] {:5} {}", entry.tick, entry.level.as_str(), msg);
    }

    println!(
        "counter={} color={:?} decoded={:?}",
        exec.counter(),
        board.color,
        String::from_utf8_lossy(&decoded)
    );
}
