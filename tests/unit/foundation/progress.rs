use super::*;

#[test]
fn clamps_and_drops_regressions() {
    let mut seen = Vec::new();
    {
        let mut p = Progress::new(|v| seen.push(v));
        p.report(-0.5);
        p.report(0.4);
        p.report(0.2);
        p.report(f64::NAN);
        p.report(3.0);
        p.finish();
    }
    assert_eq!(seen, vec![0.0, 0.4, 1.0, 1.0]);
}

#[test]
fn finish_always_reports_one() {
    let mut seen = Vec::new();
    Progress::new(|v| seen.push(v)).finish();
    assert_eq!(seen, vec![1.0]);
}
