//! Bit-parallel vertical counter debounce.
//!
//! Every button line owns a small counter, but the counters are stored
//! "vertically": bit `n` of `counter_bit0` and bit `n` of `counter_bit1`
//! together form the counter of line `n`. One pass of plain bitwise
//! operations therefore advances all eight counters at once.
//!
//! A line's counter only runs while its raw sample disagrees with the
//! confirmed state; any agreeing sample clears it. The confirmed bit flips on
//! the tick the counter wraps back to zero, i.e. after
//! [`DebounceWindow::ticks`] consecutive disagreeing samples.
//!
//! [`Debouncer::update`] must be called exactly once per tick. Each call is
//! one unit of debounce time.

use crate::config::DebounceWindow;
use crate::types::ButtonLineSet;

/// Debounce state of one 8-line port.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    counter_bit0: u8,
    counter_bit1: u8,
    /// Only advanced with [`DebounceWindow::Long`], otherwise always zero.
    counter_bit2: u8,
    confirmed: u8,
    window: DebounceWindow,
}

impl Debouncer {
    /// Create a debouncer with every line confirmed released.
    #[must_use]
    pub const fn new(window: DebounceWindow) -> Self {
        Self {
            counter_bit0: 0,
            counter_bit1: 0,
            counter_bit2: 0,
            confirmed: 0,
            window,
        }
    }

    /// Advance every line's counter by one tick.
    ///
    /// `raw` is the sampled port with pressed lines set. Returns the updated
    /// confirmed state.
    pub fn update(&mut self, raw: ButtonLineSet) -> ButtonLineSet {
        // Lines whose sample disagrees with the confirmed value.
        let delta = (raw.raw() ^ self.confirmed) & ButtonLineSet::ALL.raw();

        // Ripple-carry increment, all lines at once.
        if self.window == DebounceWindow::Long {
            self.counter_bit2 ^= self.counter_bit1 & self.counter_bit0;
        }
        self.counter_bit1 ^= self.counter_bit0;
        self.counter_bit0 = !self.counter_bit0;

        // Agreeing lines stop counting.
        self.counter_bit0 &= delta;
        self.counter_bit1 &= delta;
        self.counter_bit2 &= delta;

        // A disagreeing line whose counter wrapped to zero has held long enough.
        let accepted = delta & !(self.counter_bit0 | self.counter_bit1 | self.counter_bit2);
        if accepted != 0 {
            trace!("debounce accepted {:?}", ButtonLineSet(accepted));
        }
        self.confirmed ^= accepted;

        self.confirmed()
    }

    /// Debounced state, pressed lines set.
    #[inline]
    #[must_use]
    pub const fn confirmed(&self) -> ButtonLineSet {
        ButtonLineSet(self.confirmed & ButtonLineSet::ALL.raw())
    }

    /// Lines currently inside their debounce window.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> ButtonLineSet {
        ButtonLineSet(self.counter_bit0 | self.counter_bit1 | self.counter_bit2)
    }

    /// The configured window.
    #[inline]
    #[must_use]
    pub const fn window(&self) -> DebounceWindow {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DebounceWindow::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B1: ButtonLineSet = ButtonLineSet::BUTTON1;
    const B2: ButtonLineSet = ButtonLineSet::BUTTON2;

    /// Feed `raw` for `ticks` ticks, returning the final confirmed state.
    fn feed(debouncer: &mut Debouncer, raw: ButtonLineSet, ticks: usize) -> ButtonLineSet {
        let mut state = debouncer.confirmed();
        for _ in 0..ticks {
            state = debouncer.update(raw);
        }
        state
    }

    /// Per-line reference: count consecutive disagreements, flip at the window.
    struct ReferenceLine {
        confirmed: bool,
        count: u8,
    }

    impl ReferenceLine {
        fn update(&mut self, raw: bool, window: u8) -> bool {
            if raw == self.confirmed {
                self.count = 0;
            } else {
                self.count += 1;
                if self.count == window {
                    self.confirmed = raw;
                    self.count = 0;
                }
            }
            self.confirmed
        }
    }

    #[test]
    fn test_starts_released() {
        let debouncer = Debouncer::new(DebounceWindow::Short);
        assert!(debouncer.confirmed().is_empty());
        assert!(debouncer.pending().is_empty());
    }

    #[test]
    fn test_constant_input_is_stable() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        for _ in 0..100 {
            assert!(debouncer.update(ButtonLineSet::NONE).is_empty());
        }

        feed(&mut debouncer, ButtonLineSet::ALL, 4);
        for _ in 0..100 {
            assert_eq!(debouncer.update(ButtonLineSet::ALL), ButtonLineSet::ALL);
            assert!(debouncer.pending().is_empty());
        }
    }

    #[test]
    fn test_press_accepted_on_fourth_tick() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        assert!(debouncer.update(B1).is_empty());
        assert!(debouncer.update(B1).is_empty());
        assert!(debouncer.update(B1).is_empty());
        assert_eq!(debouncer.pending(), B1);
        assert_eq!(debouncer.update(B1), B1);
        assert!(debouncer.pending().is_empty());

        // Holding the press afterwards never flips it again.
        assert_eq!(feed(&mut debouncer, B1, 50), B1);
    }

    #[test]
    fn test_long_window_accepts_on_eighth_tick() {
        let mut debouncer = Debouncer::new(DebounceWindow::Long);
        for _ in 0..7 {
            assert!(debouncer.update(B1).is_empty());
            assert_eq!(debouncer.pending(), B1);
        }
        assert_eq!(debouncer.update(B1), B1);
    }

    #[test]
    fn test_single_tick_glitch_ignored() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        assert!(debouncer.update(B1).is_empty());
        for _ in 0..20 {
            assert!(debouncer.update(ButtonLineSet::NONE).is_empty());
        }
        assert!(debouncer.pending().is_empty());
    }

    #[test]
    fn test_interrupted_run_restarts_window() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        assert!(feed(&mut debouncer, B1, 3).is_empty());
        assert!(debouncer.update(ButtonLineSet::NONE).is_empty());
        assert!(feed(&mut debouncer, B1, 3).is_empty());
        assert_eq!(debouncer.update(B1), B1);
    }

    #[test]
    fn test_release_is_debounced_too() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        feed(&mut debouncer, B1, 4);
        assert_eq!(debouncer.confirmed(), B1);

        // Bounce on release.
        assert_eq!(debouncer.update(ButtonLineSet::NONE), B1);
        assert_eq!(debouncer.update(B1), B1);
        assert_eq!(feed(&mut debouncer, ButtonLineSet::NONE, 3), B1);
        assert!(debouncer.update(ButtonLineSet::NONE).is_empty());
    }

    #[test]
    fn test_all_lines_flip_together() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        let low = ButtonLineSet(0x0F);
        let high = ButtonLineSet(0xF0);
        feed(&mut debouncer, low, 4);
        assert_eq!(debouncer.confirmed(), low);

        // Every line disagrees: four press and four release transitions at once.
        assert_eq!(feed(&mut debouncer, high, 3), low);
        assert_eq!(debouncer.update(high), high);
    }

    #[test]
    fn test_lines_count_independently() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);

        // B2 starts changing two ticks after B1.
        debouncer.update(B1);
        debouncer.update(B1);
        assert!(debouncer.update(B1 | B2).is_empty());
        assert_eq!(debouncer.update(B1 | B2), B1);
        assert_eq!(debouncer.update(B1 | B2), B1);
        assert_eq!(debouncer.update(B1 | B2), B1 | B2);
    }

    #[test]
    fn test_opposite_transitions_do_not_interfere() {
        let mut debouncer = Debouncer::new(DebounceWindow::Short);
        feed(&mut debouncer, B1, 4);

        // B1 releases while B2 presses, with a glitch on B2 only.
        debouncer.update(B2);
        debouncer.update(ButtonLineSet::NONE);
        debouncer.update(B2);
        assert_eq!(debouncer.update(B2), ButtonLineSet::NONE);
        assert_eq!(feed(&mut debouncer, B2, 2), B2);
    }

    #[test]
    fn test_matches_per_line_reference() {
        for window in [DebounceWindow::Short, DebounceWindow::Long] {
            let mut debouncer = Debouncer::new(window);
            let mut reference: [ReferenceLine; 8] =
                core::array::from_fn(|_| ReferenceLine { confirmed: false, count: 0 });

            let mut seed: u32 = 0x1234_5678;
            let mut next = || {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (seed >> 16) as u8
            };

            let mut raw = 0u8;
            for _ in 0..5_000 {
                // Each line toggles with probability ~1/8 per tick.
                raw ^= next() & next() & next();
                let confirmed = debouncer.update(ButtonLineSet(raw));
                for (line, model) in reference.iter_mut().enumerate() {
                    let expected = model.update(raw & (1 << line) != 0, window.ticks());
                    assert_eq!(confirmed.raw() & (1 << line) != 0, expected);
                }
            }
        }
    }
}
