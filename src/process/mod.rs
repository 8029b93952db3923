/*!
 * Process Module
 * Process records and lifecycle states
 */

pub mod types;

pub use types::{Process, ProcessState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_is_armed() {
        let process = Process::new(1, 64, 0, 3);
        assert_eq!(process.remaining, process.burst);
        assert_eq!(process.state, ProcessState::New);
        assert_eq!(process.start_time, None);
        assert_eq!(process.finish_time, None);
    }

    #[test]
    fn test_metrics_unknown_until_finished() {
        let mut process = Process::new(2, 128, 1, 2);
        assert_eq!(process.turnaround(), None);
        assert_eq!(process.wait(), None);

        process.finish_time = Some(6);
        assert_eq!(process.turnaround(), Some(5));
        assert_eq!(process.wait(), Some(3));
    }
}
