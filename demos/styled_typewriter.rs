//! Styled typewriter: colored output plus a mid-run pause/resume.
//!
//! Run with: `cargo run --example styled_typewriter`

use crossbeam_channel::bounded;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use echotype::{create_typing_effect, EffectStatus, TypingEffectOptions};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

fn main() -> io::Result<()> {
    io::stdout().execute(SetForegroundColor(Color::Green))?;

    let (done_tx, done_rx) = bounded(1);
    let effect = create_typing_effect(
        [
            "$ echotype --demo",
            "#SLOW# dramatic pause engaged",
            "done.",
        ],
        TypingEffectOptions::new()
            .type_speed(Duration::from_millis(30))
            .prefix_speed("#SLOW#", Duration::from_millis(90))
            .on_char_typed(|ch, _text, _line| {
                print!("{ch}");
                let _ = io::stdout().flush();
            })
            .on_line_complete(|_line, _index| println!())
            .on_complete(move |_lines| {
                let _ = done_tx.send(());
            }),
    );

    // Show off pause/resume while the first line is typing.
    thread::sleep(Duration::from_millis(200));
    effect.pause();
    thread::sleep(Duration::from_millis(600));
    assert_eq!(effect.status(), EffectStatus::Paused);
    effect.resume();

    done_rx
        .recv_timeout(Duration::from_secs(30))
        .expect("typing did not finish");

    io::stdout().execute(ResetColor)?;
    println!("status: {}", effect.status());
    Ok(())
}
