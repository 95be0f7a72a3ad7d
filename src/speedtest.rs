use crate::clock::Sleeper;
use crate::error::SimulationError;
use crate::models::SpeedTestResult;
use crate::random::{int_in, RandomSource};
use std::time::Duration;
use tokio::sync::mpsc;

/// One of the three sequential stages of a simulated speed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPhase {
    Ping,
    Download,
    Upload,
}

impl TestPhase {
    pub fn label(&self) -> &'static str {
        match self {
            TestPhase::Ping => "Testing latency...",
            TestPhase::Download => "Testing download...",
            TestPhase::Upload => "Testing upload...",
        }
    }
}

/// Progress report emitted while a phase walks from 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseProgress {
    pub phase: TestPhase,
    pub percent: u8,
}

// (phase, step size, pause per step). Each phase has its own pacing.
const PHASE_PLAN: [(TestPhase, u8, u64); 3] = [
    (TestPhase::Ping, 10, 100),
    (TestPhase::Download, 5, 80),
    (TestPhase::Upload, 4, 70),
];

/// Simulated speed test.
///
/// Walks the three phases strictly in order, reporting percent through the
/// progress channel; each phase starts at 0 and ends at exactly 100. The
/// walk is not interruptible and drives nothing but the UI: the final result
/// is drawn from the random source after all phases finish, independent of
/// the walk.
pub async fn run_speed_test<R, S>(
    is_native: bool,
    rng: &mut R,
    sleeper: &S,
    progress: &mpsc::UnboundedSender<PhaseProgress>,
) -> Result<SpeedTestResult, SimulationError>
where
    R: RandomSource,
    S: Sleeper + ?Sized,
{
    for (phase, step, pause_ms) in PHASE_PLAN {
        let mut percent: u8 = 0;
        loop {
            // A closed channel means no one is watching; the walk still runs
            // to completion.
            let _ = progress.send(PhaseProgress { phase, percent });
            sleeper.sleep(Duration::from_millis(pause_ms)).await;
            if percent >= 100 {
                break;
            }
            percent = (percent + step).min(100);
        }
    }

    let result = if is_native {
        SpeedTestResult {
            download: int_in(rng, 10, 100),
            upload: int_in(rng, 5, 50),
            ping: int_in(rng, 5, 30),
        }
    } else {
        SpeedTestResult {
            download: int_in(rng, 20, 80),
            upload: int_in(rng, 10, 40),
            ping: int_in(rng, 5, 20),
        }
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::NoopSleeper;
    use crate::random::{ScriptedRandom, ThreadRandom};

    async fn collect_progress(is_native: bool) -> (Vec<PhaseProgress>, SpeedTestResult) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut rng = ThreadRandom;
        let result = run_speed_test(is_native, &mut rng, &NoopSleeper, &tx)
            .await
            .unwrap();
        drop(tx);

        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }
        (updates, result)
    }

    #[tokio::test]
    async fn phases_run_in_order_and_each_walks_zero_to_hundred() {
        let (updates, _) = collect_progress(false).await;

        let phases: Vec<TestPhase> = {
            let mut seen = Vec::new();
            for update in &updates {
                if seen.last() != Some(&update.phase) {
                    seen.push(update.phase);
                }
            }
            seen
        };
        assert_eq!(
            phases,
            vec![TestPhase::Ping, TestPhase::Download, TestPhase::Upload]
        );

        for phase in phases {
            let walk: Vec<u8> = updates
                .iter()
                .filter(|u| u.phase == phase)
                .map(|u| u.percent)
                .collect();
            assert_eq!(*walk.first().unwrap(), 0);
            assert_eq!(*walk.last().unwrap(), 100);
            assert!(walk.windows(2).all(|w| w[0] <= w[1]), "{:?}", walk);
        }
    }

    #[tokio::test]
    async fn step_counts_match_the_phase_plan() {
        let (updates, _) = collect_progress(true).await;

        let count = |phase| updates.iter().filter(|u| u.phase == phase).count();
        // 0..=100 by 10, 5 and 4 respectively
        assert_eq!(count(TestPhase::Ping), 11);
        assert_eq!(count(TestPhase::Download), 21);
        assert_eq!(count(TestPhase::Upload), 26);
    }

    #[tokio::test]
    async fn results_stay_inside_the_documented_ranges() {
        for _ in 0..200 {
            let (_, native) = collect_progress(true).await;
            assert!((10..=109).contains(&native.download));
            assert!((5..=54).contains(&native.upload));
            assert!((5..=34).contains(&native.ping));

            let (_, web) = collect_progress(false).await;
            assert!((20..=99).contains(&web.download));
            assert!((10..=49).contains(&web.upload));
            assert!((5..=24).contains(&web.ping));
        }
    }

    #[tokio::test]
    async fn scripted_source_pins_the_exact_boundaries() {
        let (tx, _rx) = mpsc::unbounded_channel();

        let mut low = ScriptedRandom::constant(0.0);
        let result = run_speed_test(true, &mut low, &NoopSleeper, &tx).await.unwrap();
        assert_eq!(
            result,
            SpeedTestResult {
                download: 10,
                upload: 5,
                ping: 5
            }
        );

        let mut high = ScriptedRandom::constant(0.999_999);
        let result = run_speed_test(false, &mut high, &NoopSleeper, &tx).await.unwrap();
        assert_eq!(
            result,
            SpeedTestResult {
                download: 99,
                upload: 49,
                ping: 24
            }
        );
    }

    #[tokio::test]
    async fn native_download_never_leaves_its_range_across_1000_runs() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut rng = ThreadRandom;
        for _ in 0..1000 {
            let result = run_speed_test(true, &mut rng, &NoopSleeper, &tx).await.unwrap();
            assert!(
                (10..=109).contains(&result.download),
                "download {} out of range",
                result.download
            );
        }
    }

    #[tokio::test]
    async fn walk_survives_a_dropped_progress_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let mut rng = ThreadRandom;
        let result = run_speed_test(true, &mut rng, &NoopSleeper, &tx).await;
        assert!(result.is_ok());
    }
}
