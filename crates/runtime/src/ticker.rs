/// Periodic or one-shot timer on the logical scene clock.
///
/// A ticker is owned by the view that created it. Views cancel their tickers
/// when they change phase or unmount; a cancelled ticker never fires again
/// until it is restarted.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    period_s: f64,
    accumulated_s: f64,
    repeat: bool,
    state: TickerState,
    fired: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickerState {
    Running,
    /// One-shot ticker that already fired.
    Finished,
    Cancelled,
}

/// Shortest accepted period; keeps a zero period from spinning forever.
pub const MIN_PERIOD_S: f64 = 0.001;

impl Ticker {
    pub fn interval(period_s: f64) -> Self {
        Self::new(period_s, true)
    }

    pub fn timeout(delay_s: f64) -> Self {
        Self::new(delay_s, false)
    }

    fn new(period_s: f64, repeat: bool) -> Self {
        Self {
            period_s: period_s.max(MIN_PERIOD_S),
            accumulated_s: 0.0,
            repeat,
            state: TickerState::Running,
            fired: 0,
        }
    }

    /// Advances the clock by `dt_s` and returns how many times the ticker fired.
    pub fn advance(&mut self, dt_s: f64) -> u32 {
        if self.state != TickerState::Running || dt_s <= 0.0 {
            return 0;
        }
        self.accumulated_s += dt_s;

        if !self.repeat {
            if self.accumulated_s + 1e-9 >= self.period_s {
                self.state = TickerState::Finished;
                self.fired += 1;
                return 1;
            }
            return 0;
        }

        let mut ticks = 0u32;
        while self.accumulated_s + 1e-9 >= self.period_s {
            self.accumulated_s -= self.period_s;
            ticks += 1;
        }
        self.fired += u64::from(ticks);
        ticks
    }

    pub fn cancel(&mut self) {
        self.state = TickerState::Cancelled;
    }

    pub fn restart(&mut self) {
        self.accumulated_s = 0.0;
        self.fired = 0;
        self.state = TickerState::Running;
    }

    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}
