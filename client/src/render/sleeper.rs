use std::time::{Duration, Instant};

pub struct Sleeper {
    pub target_delta_time: Duration,
    last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps off whatever remains of the frame budget. Returns false if the
    /// frame already overran it.
    pub fn sleep(&mut self) -> bool {
        let slept = match self.last_instant {
            Some(last_instant) => {
                let delta_time = Instant::now() - last_instant;

                if self.target_delta_time > delta_time {
                    spin_sleep::sleep(self.target_delta_time - delta_time);
                    true
                } else {
                    false
                }
            }

            None => {
                spin_sleep::sleep(self.target_delta_time);
                true
            }
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}
