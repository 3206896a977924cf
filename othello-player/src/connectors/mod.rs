//! Connectors let people play a [`GameSession`] through different front ends.

mod connector;
mod console;

pub use connector::{Connector, Input};
pub use console::{parse_input, CandidateDisplay, ConsoleConnector};

use crate::{GameSession, Submission};
use tracing::debug;

/// Run games on `session` through `connector` until it quits or goes away.
pub async fn play<C: Connector + Send>(session: &GameSession, connector: &mut C) {
    restart(session).await;

    loop {
        connector.render(&session.snapshot().await);

        let submission = match connector.read_input().await {
            None | Some(Input::Quit) => break,
            Some(Input::Restart) => {
                restart(session).await;
                continue;
            }
            Some(Input::Advance) => session.submit(None).await,
            Some(Input::Cell(loc)) => session.submit(Some(loc)).await,
        };
        debug!(?submission, "input handled");
    }
}

async fn restart(session: &GameSession) {
    session.start().await;
    if session.config().auto_play {
        let submission: Submission = session.submit(None).await;
        debug!(?submission, "opening auto-play");
    }
}
