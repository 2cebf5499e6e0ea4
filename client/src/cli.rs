use std::{
    io,
    process::exit,
    sync::{Arc, RwLock},
    time::Duration,
};

use anyhow::{bail, Context};

use crate::{ticker::TickerHost, State};

pub fn run_cli(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = line_res.unwrap();
        let args = line.split_whitespace();

        if let Err(e) = handle_cmd(state_arc.clone(), args) {
            eprintln!("! {e:?}");
        }
    }
}

fn handle_cmd<'a, I>(state_arc: Arc<RwLock<State>>, mut args: I) -> anyhow::Result<()>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            for _ in 0..times {
                state.board.step();
            }
        }

        "run" => {
            let rate = args.next().unwrap_or("500").parse::<u64>()?;

            let mut state = state_arc.write().unwrap();
            if state.ticker.is_some() {
                bail!("Already running");
            }

            state.ticker = Some(TickerHost::start(
                state_arc.clone(),
                Duration::from_millis(rate),
            ));
        }

        "stop" => {
            let mut state = state_arc.write().unwrap();
            if let Some(ticker) = state.ticker.take() {
                ticker.stop();
            }
        }

        "rate" => {
            let rate = args.next().context("missing rate")?.parse::<u64>()?;

            let state = state_arc.read().unwrap();
            state
                .ticker
                .as_ref()
                .context("not running")?
                .set_rate(rate);
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            state.board.toggle([row, col])?;
        }

        "clear" => {
            state_arc.write().unwrap().board.clear();
        }

        "random" => {
            let rows = args.next().map(str::parse).transpose()?;
            let cols = args.next().map(str::parse).transpose()?;

            let mut state = state_arc.write().unwrap();
            state.board.randomize(rows, cols)?;
        }

        "resize" => {
            let rows = args.next().context("missing rows")?.parse::<usize>()?;
            let cols = args.next().context("missing cols")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            state.board.randomize(Some(rows), Some(cols))?;
            state.board.clear();
        }

        "exit" => {
            exit(0);
        }

        _ => bail!("Unknown command"),
    }

    println!("OK");
    Ok(())
}
