//! Platform helpers for child-process handling.

use std::path::PathBuf;

/// Locate an executable on `PATH`.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Ignores SIGINT in this process until dropped.
///
/// Held while an interactive child owns the terminal, so an operator's
/// Ctrl-C reaches only the child. The previous disposition is restored on
/// drop.
pub struct InterruptGuard {
    #[cfg(unix)]
    previous: libc::sighandler_t,
}

impl InterruptGuard {
    /// Start ignoring SIGINT.
    pub fn ignore() -> Self {
        #[cfg(unix)]
        {
            // SAFETY: installing SIG_IGN has no preconditions; the returned
            // handler is only ever handed back to signal().
            let previous = unsafe { libc::signal(libc::SIGINT, libc::SIG_IGN) };
            Self { previous }
        }

        #[cfg(not(unix))]
        {
            Self {}
        }
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if self.previous != libc::SIG_ERR {
                // SAFETY: restores the handler signal() returned earlier.
                unsafe {
                    libc::signal(libc::SIGINT, self.previous);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn find_executable_locates_sh() {
        assert!(find_executable("sh").is_some());
    }

    #[test]
    fn find_executable_missing_program() {
        assert!(find_executable("asmago-definitely-not-installed").is_none());
    }

    #[test]
    fn interrupt_guard_restores_on_drop() {
        let guard = InterruptGuard::ignore();
        drop(guard);
        let again = InterruptGuard::ignore();
        drop(again);
    }
}
