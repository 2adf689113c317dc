//! End-to-end lifecycle tests - drive a pipeline status the way a runner
//! would and verify the external representation round trip.

use chrono::{TimeZone, Utc};
use pipetrack::{Clock, JobState, PipelineState, PipelineStatus, Serial, TickClock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn tick_clock() -> Arc<dyn Clock> {
    Arc::new(TickClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ))
}

#[test]
fn pipeline_lifecycle_end_to_end() {
    let mut status = PipelineStatus::with_clock("demo", tick_clock());
    assert_eq!(status.state, PipelineState::Queued);
    assert!(status.jobs.is_empty());

    status.start();
    assert_eq!(status.state, PipelineState::Running);
    assert!(status.start_time.is_some());
    assert_eq!(status.messages.len(), 1);
    assert_eq!(status.messages[0].message, "Pipeline started");

    status.add_job("job1");
    assert_eq!(status.jobs.len(), 1);
    let active = status.active_job().expect("job1 should be active");
    assert_eq!(active.name, "job1");
    assert_eq!(active.state, JobState::Queued);

    status.active_job_mut().unwrap().start();
    assert_eq!(status.active_job().unwrap().state, JobState::Running);

    status.active_job_mut().unwrap().complete();
    let job = status.active_job().unwrap();
    assert_eq!(job.state, JobState::Complete);
    assert!(job.complete_time.is_some());
    assert_eq!(
        job.messages.last().map(|m| m.message.as_str()),
        Some("Job completed")
    );

    status.complete();
    assert_eq!(status.state, PipelineState::Complete);
    assert!(status.complete_time.is_some());

    // Project, reconstruct, and compare field-for-field
    let value = status.to_value().unwrap();
    let reconstructed = PipelineStatus::from_value(value.clone()).unwrap();
    assert_eq!(reconstructed, status);
    assert_eq!(reconstructed.to_value().unwrap(), value);
}

#[test]
fn failed_run_keeps_the_whole_trail() {
    let mut status = PipelineStatus::with_clock("nightly-etl", tick_clock());
    status.start();

    status.add_job("extract");
    status.active_job_mut().unwrap().start();
    status.active_job_mut().unwrap().complete();

    status.add_job("transform");
    status.active_job_mut().unwrap().start();
    status
        .active_job_mut()
        .unwrap()
        .fail_with("schema mismatch in column 7");

    status.add_job("load");
    status.active_job_mut().unwrap().skip_with("upstream failed");

    status.fail();

    assert_eq!(status.state, PipelineState::Failed);
    assert!(status.fail_time.is_some());

    let states: Vec<JobState> = status.jobs.iter().map(|job| job.state).collect();
    assert_eq!(
        states,
        [JobState::Complete, JobState::Failed, JobState::Skipped]
    );
    assert_eq!(
        status.jobs[1].messages.last().map(|m| m.message.as_str()),
        Some("schema mismatch in column 7")
    );

    // The failed run round-trips like any other
    let json = status.to_json().unwrap();
    let reconstructed = PipelineStatus::from_json(&json).unwrap();
    assert_eq!(reconstructed, status);
}

#[test]
fn publish_forwards_each_snapshot_to_the_observer() {
    let observed: Arc<Mutex<Vec<(PipelineState, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);

    let mut status = PipelineStatus::with_clock("demo", tick_clock());
    status.set_publish_callback(move |snapshot| {
        sink.lock()
            .unwrap()
            .push((snapshot.state, snapshot.jobs.len()));
        Ok(())
    });

    status.start();
    status.publish().unwrap();

    status.add_job("job1");
    status.active_job_mut().unwrap().start();
    status.publish().unwrap();

    status.active_job_mut().unwrap().complete();
    status.complete();
    status.publish().unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(
        *observed,
        [
            (PipelineState::Running, 0),
            (PipelineState::Running, 1),
            (PipelineState::Complete, 1)
        ]
    );
}

#[test]
fn publish_failure_surfaces_without_disturbing_state() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let mut status = PipelineStatus::with_clock("demo", tick_clock());
    status.set_publish_callback(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("backend rejected snapshot")
    });

    status.start();
    let err = status.publish().expect_err("callback error should surface");
    assert!(err.to_string().contains("backend rejected snapshot"));

    // No retry happened and the aggregate is untouched
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(status.state, PipelineState::Running);
    assert_eq!(status.messages.len(), 1);
}
