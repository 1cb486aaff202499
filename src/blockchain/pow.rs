use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

use super::hasher::sha256_hex;

/// Longest prefix a SHA-256 hex digest can have.
pub const MAX_DIFFICULTY: u32 = 64;

/// Proof-of-Work puzzle: find `proof` such that
/// `sha256("{previous_proof}{proof}")` starts with `difficulty` hex zeros.
///
/// Holds no state besides its parameters, so independent searches can
/// run in parallel freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
    threads: usize,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
            threads: 1,
        }
    }

    /// Split the search over `threads` workers (at least one).
    pub fn with_threads(self, threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            ..self
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Validate `proof` against the previous block's proof.
    pub fn valid_proof(&self, previous_proof: u64, proof: u64) -> bool {
        let guess = sha256_hex(format!("{previous_proof}{proof}").as_bytes());
        guess
            .chars()
            .take(self.difficulty as usize)
            .all(|c| c == '0')
    }

    /// Smallest non-negative proof valid for `previous_proof`, searched
    /// linearly from zero. Gives up with `None` once `cancel` is raised.
    pub fn mine(&self, previous_proof: u64, cancel: &AtomicBool) -> Option<u64> {
        let proof = if self.threads == 1 {
            self.search(previous_proof, 0, 1, cancel, None)
        } else {
            self.search_parallel(previous_proof, cancel)
        };
        debug!(
            "POW - previous_proof={} difficulty={} -> {:?}",
            previous_proof, self.difficulty, proof
        );
        proof
    }

    /// Worker `w` of `n` tests `w, w + n, w + 2n, ...`. The shared `best`
    /// only ever decreases, and a worker stops once its candidate passes
    /// it, so the final `best` is the smallest valid proof overall.
    fn search_parallel(&self, previous_proof: u64, cancel: &AtomicBool) -> Option<u64> {
        let best = AtomicU64::new(u64::MAX);
        let step = self.threads as u64;
        thread::scope(|s| {
            for start in 0..step {
                let best = &best;
                s.spawn(move || {
                    let found = self.search(previous_proof, start, step, cancel, Some(best));
                    if let Some(found) = found {
                        best.fetch_min(found, Ordering::AcqRel);
                    }
                });
            }
        });
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        match best.load(Ordering::Acquire) {
            u64::MAX => None,
            proof => Some(proof),
        }
    }

    fn search(
        &self,
        previous_proof: u64,
        start: u64,
        step: u64,
        cancel: &AtomicBool,
        best: Option<&AtomicU64>,
    ) -> Option<u64> {
        let mut proof = start;
        loop {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            if let Some(best) = best {
                if proof > best.load(Ordering::Acquire) {
                    return None;
                }
            }
            if self.valid_proof(previous_proof, proof) {
                return Some(proof);
            }
            proof = proof.checked_add(step)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn mine(pow: ProofOfWork, previous_proof: u64) -> u64 {
        pow.mine(previous_proof, &AtomicBool::new(false)).unwrap()
    }

    #[test]
    fn mined_proof_is_valid_and_smallest() {
        let pow = ProofOfWork::new(2);
        let proof = mine(pow, 100);
        assert!(pow.valid_proof(100, proof));
        assert!((0..proof).all(|p| !pow.valid_proof(100, p)));
    }

    #[test]
    fn difficulty_zero_accepts_anything() {
        let pow = ProofOfWork::new(0);
        assert_eq!(mine(pow, 7), 0);
    }

    #[test]
    fn valid_proof_matches_digest_prefix() {
        let pow = ProofOfWork::new(3);
        let proof = mine(pow, 100);
        let digest = sha256_hex(format!("100{proof}").as_bytes());
        assert!(digest.starts_with("000"));
    }

    #[test]
    fn parallel_search_finds_the_same_proof() {
        for previous in [1u64, 100, 35293, 987_654] {
            let single = mine(ProofOfWork::new(3), previous);
            let parallel = mine(ProofOfWork::new(3).with_threads(4), previous);
            assert_eq!(single, parallel, "previous_proof={previous}");
        }
    }

    #[test]
    fn harder_difficulty_never_yields_a_smaller_proof() {
        for previous in 0..16u64 {
            let p1 = mine(ProofOfWork::new(1), previous);
            let p2 = mine(ProofOfWork::new(2), previous);
            let p3 = mine(ProofOfWork::new(3), previous);
            assert!(p1 <= p2 && p2 <= p3);
            assert!(ProofOfWork::new(1).valid_proof(previous, p3));
        }
    }

    #[test]
    fn difficulty_scaling_completes_in_bounded_time() {
        let start = Instant::now();
        let easy = mine(ProofOfWork::new(1), 100);
        assert!(ProofOfWork::new(1).valid_proof(100, easy));

        let hard = mine(ProofOfWork::new(5).with_threads(4), 100);
        assert!(ProofOfWork::new(5).valid_proof(100, hard));
        assert!(easy <= hard);
        assert!(start.elapsed() < Duration::from_secs(120));
    }

    #[test]
    fn raised_cancel_flag_stops_search() {
        let cancel = AtomicBool::new(true);
        assert_eq!(ProofOfWork::new(MAX_DIFFICULTY).mine(1, &cancel), None);
        assert_eq!(
            ProofOfWork::new(MAX_DIFFICULTY).with_threads(3).mine(1, &cancel),
            None
        );
    }

    #[test]
    fn cancel_from_another_thread() {
        let cancel = AtomicBool::new(false);
        let result = thread::scope(|s| {
            let handle = s.spawn(|| ProofOfWork::new(MAX_DIFFICULTY).mine(1, &cancel));
            thread::sleep(Duration::from_millis(20));
            cancel.store(true, Ordering::Relaxed);
            handle.join().unwrap()
        });
        assert_eq!(result, None);
    }

    #[test]
    fn thread_count_is_at_least_one() {
        assert_eq!(ProofOfWork::new(1).with_threads(0).threads(), 1);
        assert_eq!(ProofOfWork::new(99).difficulty(), MAX_DIFFICULTY);
    }
}
