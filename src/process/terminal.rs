// stdin terminal mode as it was before the line editor went raw
#[cfg(unix)]
pub struct TerminalState {
    saved: Option<libc::termios>,
}

#[cfg(unix)]
impl TerminalState {
    pub fn capture() -> Self {
        let mut termios = std::mem::MaybeUninit::<libc::termios>::uninit();
        let saved = unsafe {
            if libc::isatty(libc::STDIN_FILENO) == 1
                && libc::tcgetattr(libc::STDIN_FILENO, termios.as_mut_ptr()) == 0
            {
                Some(termios.assume_init())
            } else {
                None
            }
        };
        Self { saved }
    }

    pub fn is_captured(&self) -> bool {
        self.saved.is_some()
    }

    pub fn restore(&self) {
        if let Some(saved) = &self.saved {
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved);
            }
        }
    }
}

#[cfg(not(unix))]
pub struct TerminalState;

#[cfg(not(unix))]
impl TerminalState {
    pub fn capture() -> Self {
        TerminalState
    }

    pub fn is_captured(&self) -> bool {
        false
    }

    pub fn restore(&self) {}
}
