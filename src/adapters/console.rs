//! Local serial console adapter.
//!
//! Implements [`ConsolePort`]: polled, non-blocking, newline-delimited
//! garage commands typed on the UART monitor.  Bytes are accumulated
//! across iterations until a line terminator arrives; overlong lines are
//! truncated to the [`ConsoleLine`] capacity (they then fail to parse and
//! are ignored, which is the contract for malformed input).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: reads the UART0 driver with a zero
//!   timeout.
//! - **all other targets**: an injected line queue for host-side tests.

use crate::app::ports::{ConsoleLine, ConsolePort};

#[cfg(target_os = "espidf")]
const UART_NUM: u32 = 0;
#[cfg(target_os = "espidf")]
const UART_RX_BUF_BYTES: i32 = 256;

pub struct SerialConsole {
    partial: ConsoleLine,
    #[cfg(not(target_os = "espidf"))]
    injected: std::collections::VecDeque<ConsoleLine>,
}

impl SerialConsole {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, crate::error::Error> {
        use esp_idf_svc::sys::{uart_driver_install, ESP_OK};

        // SAFETY: one-shot driver install before the control loop starts.
        let ret = unsafe {
            uart_driver_install(
                UART_NUM,
                UART_RX_BUF_BYTES,
                0,
                0,
                core::ptr::null_mut(),
                0,
            )
        };
        if ret != ESP_OK as i32 {
            return Err(crate::error::Error::Init("UART0 driver install failed"));
        }
        Ok(Self {
            partial: ConsoleLine::new(),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, crate::error::Error> {
        Ok(Self {
            partial: ConsoleLine::new(),
            injected: std::collections::VecDeque::new(),
        })
    }

    /// Queue a line as if it had been typed on the console (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn inject_line(&mut self, line: &str) {
        let mut l = ConsoleLine::new();
        for c in line.chars().take(l.capacity()) {
            let _ = l.push(c);
        }
        self.injected.push_back(l);
    }

    /// Fold one received byte into the partial line.  Returns a complete
    /// trimmed line when a terminator arrives.
    #[cfg(target_os = "espidf")]
    fn push_byte(&mut self, byte: u8) -> Option<ConsoleLine> {
        if byte == b'\n' || byte == b'\r' {
            if self.partial.is_empty() {
                return None; // bare CR/LF between commands
            }
            let line = self.partial.clone();
            self.partial.clear();
            return Some(line);
        }
        // Truncate silently past capacity; the line will fail parsing.
        let _ = self.partial.push(char::from(byte));
        None
    }
}

impl ConsolePort for SerialConsole {
    #[cfg(target_os = "espidf")]
    fn read_line(&mut self) -> Option<ConsoleLine> {
        use esp_idf_svc::sys::uart_read_bytes;

        let mut byte: u8 = 0;
        loop {
            // Zero timeout: drain whatever has already arrived, never block.
            // SAFETY: driver installed in new(); single-threaded access.
            let n = unsafe {
                uart_read_bytes(UART_NUM, (&raw mut byte).cast(), 1, 0)
            };
            if n != 1 {
                return None;
            }
            if let Some(line) = self.push_byte(byte) {
                return Some(line);
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_line(&mut self) -> Option<ConsoleLine> {
        let _ = &self.partial;
        self.injected.pop_front()
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn injected_lines_come_back_in_order() {
        let mut console = SerialConsole::new().unwrap();
        console.inject_line("open");
        console.inject_line("close");
        assert_eq!(console.read_line().as_deref(), Some("open"));
        assert_eq!(console.read_line().as_deref(), Some("close"));
        assert_eq!(console.read_line(), None);
    }

    #[test]
    fn overlong_injected_line_truncates() {
        let mut console = SerialConsole::new().unwrap();
        let long = "x".repeat(100);
        console.inject_line(&long);
        let line = console.read_line().unwrap();
        assert_eq!(line.len(), line.capacity());
    }
}
