use std::{
    sync::{
        mpsc::{self, Sender},
        Arc, RwLock,
    },
    thread,
    time::Duration,
};

use crate::State;

/// Owns the generation thread: one `step()` per interval until stopped.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<u64>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, mut interval: Duration) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        thread::spawn(move || {
            while stop_receiver.try_recv().is_err() {
                let mut state = state_arc.write().unwrap();
                state.board.step();
                drop(state);

                if let Ok(rate) = rate_receiver.try_recv() {
                    interval = Duration::from_millis(rate);
                }

                spin_sleep::sleep(interval);
            }
        });

        Self {
            stop_sender,
            rate_sender,
        }
    }

    pub fn stop(self) {
        self.stop_sender.send(()).unwrap();
    }

    pub fn set_rate(&self, rate_millis: u64) {
        self.rate_sender.send(rate_millis).unwrap();
    }
}
