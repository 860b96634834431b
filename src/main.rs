// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for opforge65.

fn main() {
    env_logger::init();
    if let Err(err) = opforge65::cli::run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
