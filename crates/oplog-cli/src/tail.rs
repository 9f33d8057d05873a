use crate::backend::{BackendCommand, MAX_DURATION_DIAGNOSTIC};
use anyhow::{Context, Result};
use oplog_format::{JsonReshaper, LineTransform, TableRenderer, header_lines};
use std::io::{BufRead, BufReader};
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Pause between reconnect attempts. The known failure mode is a
/// deterministic hourly disconnect, so there is no backoff growth and no
/// attempt cap.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Lookback injected when no explicit range was given, so a reconnect does
/// not replay a large backlog.
pub const DEFAULT_TAIL_LOOKBACK: &str = "--since=2s";

/// Per-line formatting applied to a live stream. Tail mode never compacts
/// duplicates or counts limits; both assume a bounded, reversible batch.
pub enum TailFormat {
    Raw,
    Table,
    Json,
}

/// Follow-mode driver: repeatedly invokes the backend, formats stdout,
/// filters the known disconnect diagnostic out of stderr, and restarts on
/// backend exit until interrupted.
pub struct TailSession {
    command: BackendCommand,
    format: TailFormat,
    running: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Child>>>,
}

impl TailSession {
    pub fn new(command: BackendCommand, format: TailFormat) -> Self {
        Self {
            command,
            format,
            running: Arc::new(AtomicBool::new(true)),
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let running = self.running.clone();
        let current = self.current.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            if let Ok(mut guard) = current.lock() {
                if let Some(child) = guard.as_mut() {
                    let _ = child.kill();
                }
            }
        })
        .context("failed to install interrupt handler")?;

        // Table headers once per session, not once per reconnect
        if matches!(self.format, TailFormat::Table) {
            for line in header_lines() {
                println!("{}", line);
            }
        }

        while self.running.load(Ordering::SeqCst) {
            self.stream_once()?;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            thread::sleep(RECONNECT_DELAY);
        }
        Ok(())
    }

    /// One backend lifetime: spawn, stream until it exits, reap.
    fn stream_once(&mut self) -> Result<()> {
        let mut child = self.command.spawn_tail()?;
        let stdout = child.stdout.take().context("backend stdout unavailable")?;
        let stderr = child.stderr.take().context("backend stderr unavailable")?;

        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(child);
        }
        // The interrupt handler may have fired between spawn and the store
        // above, in which case it found nothing to kill.
        if !self.running.load(Ordering::SeqCst) {
            if let Ok(mut guard) = self.current.lock() {
                if let Some(child) = guard.as_mut() {
                    let _ = child.kill();
                }
            }
        }

        let stderr_thread = thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(|l| l.ok()) {
                if !line.contains(MAX_DURATION_DIAGNOSTIC) {
                    eprintln!("{}", line);
                }
            }
        });

        let mut stage: Option<Box<dyn LineTransform>> = match self.format {
            TailFormat::Raw => None,
            TailFormat::Table => Some(Box::new(TableRenderer)),
            TailFormat::Json => Some(Box::new(JsonReshaper)),
        };
        let mut formatted = Vec::new();
        for line in BufReader::new(stdout).lines().map_while(|l| l.ok()) {
            match stage.as_mut() {
                Some(stage) => {
                    formatted.clear();
                    stage.push(&line, &mut formatted);
                    for line in &formatted {
                        println!("{}", line);
                    }
                }
                None => println!("{}", line),
            }
        }

        let _ = stderr_thread.join();
        if let Ok(mut guard) = self.current.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.wait();
            }
        }
        Ok(())
    }
}
