#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tracing::{error, info};

/// Reason the application is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    OsSigInt,
    OsSigTerm,
    UserInt,
}

/// Terminator tells every main loop to stop
#[derive(Debug, Clone)]
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    pub fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    pub fn terminate(&mut self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }
}

#[cfg(unix)]
async fn terminate_by_unix_signal(mut terminator: Terminator) {
    let (mut interrupt_signal, mut terminate_signal) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt_signal), Ok(terminate_signal)) => (interrupt_signal, terminate_signal),
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "could not listen for os signals");
                return;
            }
        };

    let interrupted = tokio::select! {
        _ = interrupt_signal.recv() => Interrupted::OsSigInt,
        _ = terminate_signal.recv() => Interrupted::OsSigTerm,
    };
    info!(?interrupted, "received os signal");

    if let Err(err) = terminator.terminate(interrupted) {
        error!(error = %err, "could not broadcast the os signal");
    }
}

// create a broadcast channel for retrieving the application kill signal
pub fn create_termination() -> (Terminator, broadcast::Receiver<Interrupted>) {
    let (tx, rx) = broadcast::channel(1);
    let terminator = Terminator::new(tx);

    #[cfg(unix)]
    tokio::spawn(terminate_by_unix_signal(terminator.clone()));

    (terminator, rx)
}
