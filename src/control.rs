//! Remote control via Unix socket
//!
//! Rigs in the field usually run headless with no keyboard attached, so the
//! same actions the key map produces can be injected over a local socket:
//!
//!   echo calibrate | nc -U /tmp/saccade.sock

use std::io::{BufRead, BufReader};
use std::os::unix::net::{UnixListener, UnixStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

const SOCKET_PATH: &str = "/tmp/saccade.sock";

/// Commands that can be sent over the socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleCalibration,
    Faster,
    Slower,
    ToggleFps,
    Quit,
}

/// Controller that listens for commands on a Unix socket
pub struct Controller {
    receiver: Receiver<Command>,
    _listener_thread: thread::JoinHandle<()>,
}

impl Controller {
    /// Create a new controller listening on the Unix socket
    pub fn new() -> Result<Self, String> {
        // Remove existing socket if present
        let _ = std::fs::remove_file(SOCKET_PATH);

        let listener = UnixListener::bind(SOCKET_PATH)
            .map_err(|e| format!("Failed to bind socket: {}", e))?;

        // Set non-blocking so we can check for new connections
        listener
            .set_nonblocking(true)
            .map_err(|e| format!("Failed to set non-blocking: {}", e))?;

        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::listener_loop(listener, sender);
        });

        Ok(Self {
            receiver,
            _listener_thread: handle,
        })
    }

    fn listener_loop(listener: UnixListener, sender: Sender<Command>) {
        loop {
            match listener.accept() {
                Ok((stream, _)) => {
                    let sender = sender.clone();
                    thread::spawn(move || {
                        Self::handle_client(stream, sender);
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // No connection ready, sleep briefly
                    thread::sleep(std::time::Duration::from_millis(50));
                }
                Err(_) => {
                    // Socket closed or error, exit loop
                    break;
                }
            }
        }
    }

    fn handle_client(stream: UnixStream, sender: Sender<Command>) {
        let reader = BufReader::new(stream);
        for line in reader.lines().map_while(Result::ok) {
            if let Some(cmd) = Self::parse_command(&line) {
                if sender.send(cmd).is_err() {
                    break;
                }
            }
        }
    }

    fn parse_command(line: &str) -> Option<Command> {
        match line.trim().to_lowercase().as_str() {
            "c" | "calibrate" => Some(Command::ToggleCalibration),
            "+" | "faster" => Some(Command::Faster),
            "-" | "slower" => Some(Command::Slower),
            "f" | "fps" => Some(Command::ToggleFps),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Get any pending commands (non-blocking)
    pub fn poll(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(cmd) = self.receiver.try_recv() {
            commands.push(cmd);
        }
        commands
    }

    /// Get the socket path
    pub fn socket_path() -> &'static str {
        SOCKET_PATH
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Clean up the socket file
        let _ = std::fs::remove_file(SOCKET_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_aliases() {
        assert_eq!(
            Controller::parse_command("calibrate"),
            Some(Command::ToggleCalibration)
        );
        assert_eq!(Controller::parse_command("c"), Some(Command::ToggleCalibration));
        assert_eq!(Controller::parse_command("+"), Some(Command::Faster));
        assert_eq!(Controller::parse_command("slower"), Some(Command::Slower));
        assert_eq!(Controller::parse_command("FPS"), Some(Command::ToggleFps));
        assert_eq!(Controller::parse_command("  quit  "), Some(Command::Quit));
    }

    #[test]
    fn test_parse_command_rejects_noise() {
        assert_eq!(Controller::parse_command(""), None);
        assert_eq!(Controller::parse_command("speed 3"), None);
        assert_eq!(Controller::parse_command("calibrate now"), None);
    }
}
