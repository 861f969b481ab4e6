use std::env;
use log::error;
use crate::dashboard::View;

mod classifier;
mod config;
mod dashboard;
mod errors;
mod initialization;
mod manager_model;
mod manager_sheet;
mod models;
mod selection;

/// Retries a fallible call up to two more times with a short pause in between
#[macro_export]
macro_rules! retry {
    ($f:expr) => {{
        let mut result = $f();
        for _ in 0..2 {
            if result.is_ok() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_secs(2));
            result = $f();
        }
        result
    }};
}

fn main() {
    let mut mgr = match initialization::init() {
        Ok(mgr) => mgr,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    // A view given as arguments renders once and exits, otherwise the
    // dashboard takes navigation commands from stdin
    let args = env::args().skip(1).collect::<Vec<String>>().join(" ");
    let one_shot: Option<View>;
    if args.is_empty() {
        one_shot = None;
    } else if let Some(view) = View::parse(&args) {
        one_shot = Some(view);
    } else {
        println!("Options: home, current, date YYYY-MM-DD");
        return;
    }

    if let Err(e) = dashboard::run(&mut mgr, one_shot) {
        error!("{}", e);
        println!("{}", e);
    }
}
