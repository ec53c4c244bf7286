//! Host runtime
//!
//! Wires the terminal, the tick scheduler and OS signals to the
//! [`Controller`], executes the commands it returns and draws each frame.

pub mod terminal;

use std::{future::Future, io::Write};

use anyhow::Context;
use crossterm::event::EventStream;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::{
    config::Config,
    controller::{Command, Controller, Event},
    render::Theme,
    tasks::{forward_terminal_events, now, schedule_tick},
    utils::shutdown_signal,
};

pub use terminal::{InlineRenderer, TerminalSession};

/// Run the timer on the current terminal until the user quits
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let mut controller = Controller::new(config.duration, config.layout());
    let theme = if config.plain { Theme::plain() } else { Theme::colored() };

    let (events_tx, events_rx) = unbounded_channel();
    let (width, height) =
        crossterm::terminal::size().context("failed to read terminal size")?;
    events_tx
        .send(Event::Resize { width, height })
        .context("failed to queue initial resize")?;

    let _session = TerminalSession::enter()?;
    let input = tokio::spawn(forward_terminal_events(EventStream::new(), events_tx.clone()));
    let input_abort = input.abort_handle();
    let input_done = async move { input.await.context("terminal input task failed")? };

    let mut renderer = InlineRenderer::new(std::io::stdout());
    renderer.set_width(width);
    let result = run_loop(
        &mut controller,
        events_tx,
        events_rx,
        &mut renderer,
        &theme,
        input_done,
        shutdown_signal(),
    )
    .await;

    input_abort.abort();
    result
}

/// Reduce events one at a time until a quit command or a shutdown signal.
///
/// `input` is the terminal input source; when it finishes, its error ends
/// the loop since no further keys can arrive.
pub async fn run_loop<W, I, F>(
    controller: &mut Controller,
    events_tx: UnboundedSender<Event>,
    mut events_rx: UnboundedReceiver<Event>,
    renderer: &mut InlineRenderer<W>,
    theme: &Theme,
    input: I,
    shutdown: F,
) -> anyhow::Result<()>
where
    W: Write,
    I: Future<Output = anyhow::Result<()>>,
    F: Future<Output = anyhow::Result<()>>,
{
    tokio::pin!(input);
    tokio::pin!(shutdown);
    renderer.draw(&controller.view(theme))?;

    loop {
        // events_tx lives in this frame, so the channel never reports closed
        let event = tokio::select! {
            Some(event) = events_rx.recv() => event,
            result = &mut input => {
                result?;
                debug!("Terminal input finished");
                break;
            }
            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received");
                break;
            }
        };

        if let Event::Resize { width, .. } = event {
            renderer.set_width(width);
        }

        match controller.update_at(event, now()) {
            Some(Command::ScheduleTick(delay)) => {
                schedule_tick(delay, events_tx.clone());
            }
            Some(Command::Println(line)) => renderer.print_line(&line)?,
            Some(Command::Quit) => {
                info!("Leaving event loop");
                break;
            }
            None => {}
        }

        renderer.draw(&controller.view(theme))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Layout,
        controller::COMPLETION_NOTICE,
        state::Phase,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn never() -> std::future::Pending<anyhow::Result<()>> {
        std::future::pending()
    }

    #[tokio::test(start_paused = true)]
    async fn runs_a_short_countdown_to_completion() {
        let mut controller = Controller::new(3, Layout::default());
        let theme = Theme::plain();
        let (tx, rx) = unbounded_channel();
        tx.send(Event::Resize { width: 60, height: 20 }).unwrap();
        tx.send(key('s')).unwrap();

        let quitter = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            let _ = quitter.send(key('q'));
        });

        let mut renderer = InlineRenderer::new(Vec::new());
        run_loop(&mut controller, tx, rx, &mut renderer, &theme, never(), never())
            .await
            .unwrap();

        assert_eq!(controller.timer().phase(), Phase::Complete);
        assert_eq!(controller.timer().seconds_elapsed(), 3);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches(COMPLETION_NOTICE).count(), 1);
        assert!(out.contains(" 100%"));
    }

    #[tokio::test(start_paused = true)]
    async fn quit_before_start_leaves_timer_idle() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        tx.send(key('q')).unwrap();

        let mut renderer = InlineRenderer::new(Vec::new());
        run_loop(&mut controller, tx, rx, &mut renderer, &Theme::plain(), never(), never())
            .await
            .unwrap();

        assert_eq!(controller.timer().phase(), Phase::Idle);
        assert_eq!(controller.timer().seconds_elapsed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_mid_countdown_stops_ticking() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        tx.send(key('s')).unwrap();

        let quitter = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5_500)).await;
            let _ = quitter.send(key('q'));
        });

        let mut renderer = InlineRenderer::new(Vec::new());
        run_loop(&mut controller, tx, rx, &mut renderer, &Theme::plain(), never(), never())
            .await
            .unwrap();

        assert_eq!(controller.timer().seconds_elapsed(), 5);
        assert!(controller.timer().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_signal_ends_the_loop() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        let mut renderer = InlineRenderer::new(Vec::new());

        run_loop(
            &mut controller,
            tx,
            rx,
            &mut renderer,
            &Theme::plain(),
            never(),
            async { Ok(()) },
        )
        .await
        .unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("1m0s"));
    }

    #[tokio::test]
    async fn shutdown_errors_are_fatal() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        let mut renderer = InlineRenderer::new(Vec::new());

        let result = run_loop(
            &mut controller,
            tx,
            rx,
            &mut renderer,
            &Theme::plain(),
            never(),
            async { Err(anyhow::anyhow!("no signals")) },
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_read_error_ends_the_loop() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        let start = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        let terminal = futures::stream::iter(vec![
            Ok(crossterm::event::Event::Resize(60, 20)),
            Ok(crossterm::event::Event::Key(start)),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "tty gone")),
        ]);
        let input = forward_terminal_events(terminal, tx.clone());
        let mut renderer = InlineRenderer::new(Vec::new());

        let result = tokio::time::timeout(
            Duration::from_secs(3600),
            run_loop(&mut controller, tx, rx, &mut renderer, &Theme::plain(), input, never()),
        )
        .await
        .expect("loop must not hang once input fails");

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("tty gone"));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_stream_ends_the_loop() {
        let mut controller = Controller::new(60, Layout::default());
        let (tx, rx) = unbounded_channel();
        let terminal = futures::stream::iter(Vec::<std::io::Result<crossterm::event::Event>>::new());
        let input = forward_terminal_events(terminal, tx.clone());
        let mut renderer = InlineRenderer::new(Vec::new());

        let result = tokio::time::timeout(
            Duration::from_secs(3600),
            run_loop(&mut controller, tx, rx, &mut renderer, &Theme::plain(), input, never()),
        )
        .await
        .expect("loop must not hang once input closes");

        assert!(result.is_err());
    }
}
