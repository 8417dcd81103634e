//! Minimal typewriter: type a few lines to stdout and exit.
//!
//! Run with: `cargo run --example typewriter`

use crossbeam_channel::bounded;
use echotype::{create_typing_effect, TypingEffectOptions};
use std::io::{self, Write};
use std::time::Duration;

fn main() {
    let (done_tx, done_rx) = bounded(1);

    let effect = create_typing_effect(
        [
            "Hello from echotype.",
            "Each character arrives on its own tick...",
            "#FAST# ...unless a prefix rule says otherwise!",
        ],
        TypingEffectOptions::new()
            .type_speed(Duration::from_millis(35))
            .prefix_speed("#FAST#", Duration::from_millis(8))
            .on_char_typed(|ch, _text, _line| {
                print!("{ch}");
                let _ = io::stdout().flush();
            })
            .on_line_complete(|_line, _index| println!())
            .on_complete(move |lines| {
                let _ = done_tx.send(lines.len());
            }),
    );

    let typed = done_rx
        .recv_timeout(Duration::from_secs(30))
        .expect("typing did not finish");
    println!("-- {typed} lines typed, status: {}", effect.status());
}
