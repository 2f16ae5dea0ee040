use dnstap_gen_domain::RunReport;

pub fn print(report: &RunReport) {
    for conn in &report.completed {
        println!(
            "connection #{:<4} {:>8} frames in {:>10.3}s  {:>12.2} frames/s",
            conn.connection,
            conn.frames_sent,
            conn.elapsed.as_secs_f64(),
            conn.frames_per_second()
        );
    }
    for failure in &report.failed {
        if failure.source.is_cancelled() {
            println!(
                "connection #{:<4} cancelled after {} frames",
                failure.connection, failure.frames_sent
            );
        } else {
            println!("{} ({} frames sent)", failure, failure.frames_sent);
        }
    }

    println!(
        "total: {} frames over {} connections ({} ok, {} failed) in {:.3}s, {:.2} frames/s",
        report.total_frames(),
        report.completed.len() + report.failed.len(),
        report.completed.len(),
        report.failed.len(),
        report.elapsed.as_secs_f64(),
        report.frames_per_second()
    );
}
