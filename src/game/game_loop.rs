//! Loop driver - owns one session and ticks it at the session's current speed

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::direction::Direction;
use super::session::{GamePhase, GameSession, TickOutcome};
use crate::config::SESSION_CHANNEL_CAPACITY;
use crate::high_score::HighScoreKeeper;
use crate::protocol::ServerMessage;

/// Commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Reset,
    Input(Direction),
}

/// Channels to a running session task
pub struct SessionHandle {
    pub id: Uuid,
    pub commands: mpsc::Sender<SessionCommand>,
    pub messages: mpsc::Receiver<ServerMessage>,
    pub task: JoinHandle<()>,
}

/// Spawn the driver task for a session.
/// The task stops when the command sender is dropped or the message receiver goes away.
pub fn spawn_session(session: GameSession, keeper: Arc<HighScoreKeeper>) -> SessionHandle {
    let id = Uuid::new_v4();
    let (command_tx, command_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
    let (message_tx, message_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);

    let task = tokio::spawn(
        run_session(id, session, keeper, command_rx, message_tx)
            .instrument(info_span!("session", %id)),
    );

    SessionHandle {
        id,
        commands: command_tx,
        messages: message_rx,
        task,
    }
}

/// Periodic trigger whose first tick is one full period away
fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// What woke the loop
enum Step {
    Command(SessionCommand),
    Tick(TickOutcome),
}

async fn run_session(
    id: Uuid,
    mut session: GameSession,
    keeper: Arc<HighScoreKeeper>,
    mut commands: mpsc::Receiver<SessionCommand>,
    messages: mpsc::Sender<ServerMessage>,
) {
    session.adopt_high_score(keeper.current());

    let hello = ServerMessage::Hello {
        session: id,
        grid: *session.grid(),
        high_score: session.high_score(),
    };
    let initial = ServerMessage::Update {
        state: session.snapshot(),
    };
    if messages.send(hello).await.is_err() || messages.send(initial).await.is_err() {
        return;
    }

    let mut ticker_handle: Option<Interval> = None;
    let mut current_interval: Option<Duration> = None;

    loop {
        // Replace the trigger whenever the session wants a different pace
        let wanted = session.tick_interval();
        if wanted != current_interval {
            match wanted {
                Some(period) => debug!("Tick interval now {}ms", period.as_millis()),
                None => debug!("Ticking stopped"),
            }
            ticker_handle = wanted.map(ticker);
            current_interval = wanted;
        }

        let step = tokio::select! {
            command = commands.recv() => match command {
                Some(command) => Step::Command(command),
                None => break,
            },
            _ = next_tick(&mut ticker_handle) => Step::Tick(session.tick()),
        };

        let outgoing = match step {
            Step::Command(command) => apply_command(&mut session, &keeper, command),
            Step::Tick(outcome) => tick_messages(&session, outcome),
        };

        if session.high_score() > keeper.current() {
            keeper.record(session.high_score()).await;
        }

        for msg in outgoing {
            if messages.send(msg).await.is_err() {
                debug!("Client went away");
                return;
            }
        }
    }

    info!("Session ended with score {}", session.score());
}

fn apply_command(
    session: &mut GameSession,
    keeper: &HighScoreKeeper,
    command: SessionCommand,
) -> Vec<ServerMessage> {
    match command {
        SessionCommand::Start => {
            if !session.start() {
                return Vec::new();
            }
            info!("Game started");
            let mut outgoing = vec![ServerMessage::Update {
                state: session.snapshot(),
            }];
            // Only a board too small to hold any food ends here
            if session.phase() == GamePhase::Over {
                outgoing.extend(over_message(session));
            }
            outgoing
        }
        SessionCommand::Reset => {
            session.reset();
            session.adopt_high_score(keeper.current());
            info!("Game reset");
            vec![ServerMessage::Update {
                state: session.snapshot(),
            }]
        }
        SessionCommand::Input(direction) => {
            if session.handle_input(direction) {
                debug!(?direction, "Heading changed");
            }
            Vec::new()
        }
    }
}

fn tick_messages(session: &GameSession, outcome: TickOutcome) -> Vec<ServerMessage> {
    let update = ServerMessage::Update {
        state: session.snapshot(),
    };

    match outcome {
        TickOutcome::Idle | TickOutcome::Moved => vec![update],
        TickOutcome::Ate(award) => {
            debug!(
                score = award.score,
                speed_ms = award.speed_ms,
                new_record = award.new_record,
                "Food eaten"
            );
            vec![update]
        }
        TickOutcome::GameOver(cause) => {
            info!(?cause, score = session.score(), "Game over");
            let mut outgoing = vec![update];
            outgoing.extend(over_message(session));
            outgoing
        }
    }
}

fn over_message(session: &GameSession) -> Option<ServerMessage> {
    session.end_cause().map(|cause| ServerMessage::Over {
        cause,
        score: session.score(),
        high_score: session.high_score(),
    })
}
