//! Bridge dispatch
//!
//! Ties the components together the way the device runs: the main loop
//! polls the receive path and feeds fault-free words to the
//! demultiplexer, while a periodic timer tick drains the transmit FIFO
//! one word at a time. Outbound frames are pre-built at construction and
//! fed into the FIFO by an optional transmit schedule.
//!
//! `poll_receive` and `service_schedule` belong to the main context;
//! `on_timer_tick` is meant to be called from the timer interrupt. The
//! transmit FIFO tolerates that split by design; everything else on this
//! type must be driven from one context at a time, so an embedding that
//! really preempts needs to wrap the bridge in its platform's critical
//! section.

use galaxy_hal::delay::SpinDelay;
use galaxy_hal::gpio::OutputLatch;
use galaxy_hal::uart::{NineBitChannel, TxTransceiver};
use galaxy_protocol::{FrameTable, Reception, Word, FIRST_POLL_INDEX};

use crate::config::BridgeConfig;
use crate::demux::DigitalBreakout;
use crate::fifo::{WordFifo, TX_FIFO_CAPACITY};
use crate::uart::UartLink;

/// Running counters over the bridge's traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Fault-free words received and demultiplexed
    pub received: u32,
    /// Words pushed out on the bus
    pub transmitted: u32,
    /// Words received with a framing fault
    pub framing_faults: u32,
    /// Words received with an overrun fault
    pub overrun_faults: u32,
    /// Words dropped because the transmit FIFO was full
    pub dropped_words: u32,
}

/// Periodic frame transmission state
#[derive(Debug, Clone, Copy)]
struct Schedule {
    /// Main-loop iterations between frame enqueues
    period: u32,
    /// Iterations counted since the last enqueue
    elapsed: u32,
    /// Frame table index to send next
    next_command: usize,
}

/// The assembled bridge: receive/demux path, transmit drain and schedule
#[derive(Debug)]
pub struct Bridge<C, X, D, P> {
    link: UartLink<C, X, D>,
    demux: DigitalBreakout<P>,
    frames: FrameTable,
    tx_fifo: WordFifo<TX_FIFO_CAPACITY>,
    schedule: Option<Schedule>,
    stats: LinkStats,
}

impl<C, X, D, P> Bridge<C, X, D, P>
where
    C: NineBitChannel,
    X: TxTransceiver,
    D: SpinDelay,
    P: OutputLatch,
{
    /// Initialize the link and pre-build the outbound frame table
    pub fn new(
        mut link: UartLink<C, X, D>,
        demux: DigitalBreakout<P>,
        config: &BridgeConfig,
    ) -> Self {
        link.initialize(&config.link);
        let mut bridge = Self {
            link,
            demux,
            frames: FrameTable::build(config.max_slots),
            tx_fifo: WordFifo::new(),
            schedule: None,
            stats: LinkStats::default(),
        };
        if let Some(period) = config.schedule_period {
            bridge.enable_schedule(period);
        }
        bridge
    }

    /// Service the receive path once; main context
    ///
    /// Fault-free words are handed to the demultiplexer; faulted words
    /// only bump the fault counters (the transaction layer has already
    /// run any hardware recovery).
    pub fn poll_receive(&mut self) -> Option<Reception> {
        let reception = self.link.receive_word()?;
        if reception.framing_error {
            self.stats.framing_faults += 1;
        }
        if reception.overrun_error {
            self.stats.overrun_faults += 1;
        }
        if reception.is_clean() {
            self.stats.received += 1;
            self.demux.update(reception.word.to_raw());
        }
        Some(reception)
    }

    /// Drain at most one queued word onto the bus; timer-tick context
    ///
    /// Transmits only when the transmitter is armed with a free buffer
    /// and the shifter holds nothing in flight, matching one word per
    /// tick on the reference hardware.
    pub fn on_timer_tick(&mut self) {
        if !(self.link.transmitter_ready() && self.link.shifter_idle()) {
            return;
        }
        if let Some(raw) = self.tx_fifo.dequeue() {
            self.link.transmit_word(Word::from_raw(raw));
            self.stats.transmitted += 1;
        }
    }

    /// Count one main-loop iteration against the transmit schedule
    ///
    /// When the period expires, the next frame of the cycle is queued:
    /// Disconnect, Choose-Slot, then the poll frames, after which the
    /// cycle wraps back to the first poll frame.
    pub fn service_schedule(&mut self) {
        let Some(mut schedule) = self.schedule else {
            return;
        };
        schedule.elapsed += 1;
        if schedule.elapsed >= schedule.period {
            schedule.elapsed = 0;
            self.enqueue_frame(schedule.next_command);
            schedule.next_command += 1;
            if schedule.next_command >= self.frames.len() {
                schedule.next_command = FIRST_POLL_INDEX;
            }
        }
        self.schedule = Some(schedule);
    }

    /// Turn the transmit schedule on with the given period, restarting
    /// the cycle from the Disconnect frame
    pub fn enable_schedule(&mut self, period: u32) {
        self.schedule = Some(Schedule {
            period: period.max(1),
            elapsed: 0,
            next_command: 0,
        });
    }

    /// Turn the transmit schedule off; queued words still drain
    pub fn disable_schedule(&mut self) {
        self.schedule = None;
    }

    /// Queue one pre-built frame (body plus CRC words) for transmission
    ///
    /// Words that do not fit the FIFO are dropped and counted; returns
    /// whether the complete frame was accepted.
    pub fn enqueue_frame(&mut self, index: usize) -> bool {
        let Some(frame) = self.frames.get(index) else {
            return false;
        };
        let mut complete = true;
        for word in frame.wire_words() {
            if !self.tx_fifo.enqueue(word.to_raw()) {
                self.stats.dropped_words += 1;
                complete = false;
            }
        }
        complete
    }

    /// Traffic counters
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Pre-built outbound frames
    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Demultiplexer and its output pins
    pub fn demux(&self) -> &DigitalBreakout<P> {
        &self.demux
    }

    /// The underlying transaction layer
    pub fn link(&self) -> &UartLink<C, X, D> {
        &self.link
    }

    /// Mutable access to the transaction layer
    pub fn link_mut(&mut self) -> &mut UartLink<C, X, D> {
        &mut self.link
    }
}
