use colored::*;

use crate::terminal::print;

const BANNER_0: &str = r#"
            ____
           / ___|_      _____  ___ _ __  _ __
           \___ \ \ /\ / / _ \/ _ \ '_ \| '__|
            ___) \ V  V /  __/  __/ |_) | |
           |____/ \_/\_/ \___|\___| .__/|_|
                                  |_|
"#;

const BANNER_1: &str = r#"
     ███████ ██     ██ ███████ ███████ ██████  ██████
     ██      ██     ██ ██      ██      ██   ██ ██   ██
     ███████ ██  █  ██ █████   █████   ██████  ██████
          ██ ██ ███ ██ ██      ██      ██      ██   ██
     ███████  ███ ███  ███████ ███████ ██      ██   ██
"#;

pub fn print() {
    let art: ColoredString = match rand::random_range(0..=1u8) {
        0 => BANNER_0.green(),
        _ => BANNER_1.truecolor(80, 80, 100),
    };
    print::print(&art.to_string());
}
