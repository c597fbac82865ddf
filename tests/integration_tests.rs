use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run chartwise with the given arguments, feeding `stdin` when provided
fn run_chartwise(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chartwise"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn chartwise");

    if let Some(mut handle) = child.stdin.take() {
        if let Some(content) = stdin {
            handle
                .write_all(content.as_bytes())
                .expect("Failed to write to stdin");
        }
    }

    child.wait_with_output().expect("Failed to wait for chartwise")
}

/// Render a fixture and return the SVG document
fn render_svg(args: &[&str]) -> String {
    let output = run_chartwise(args, None);
    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("SVG output is not UTF-8")
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_end_to_end_bar_chart() {
    let svg = render_svg(&[
        "render",
        "test/bar_chart.csv",
        "--chart-type",
        "Bar",
        "--label",
        "region",
        "--value",
        "sales",
    ]);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"1000\""));
    // background plus one rect per row
    assert_eq!(count(&svg, "<rect"), 5);
    assert!(svg.contains("North"));
    assert!(svg.contains("sales"));
}

#[test]
fn test_end_to_end_bar_hover() {
    let svg = render_svg(&[
        "render",
        "test/bar_chart.csv",
        "--chart-type",
        "Bar",
        "--label",
        "region",
        "--value",
        "sales",
        "--hover",
        "150,340",
    ]);
    // tooltip box on top of the bars
    assert_eq!(count(&svg, "<rect"), 6);
    assert!(svg.contains("region: North"));
    assert!(svg.contains("sales: 120"));
}

#[test]
fn test_end_to_end_line_chart() {
    let svg = render_svg(&[
        "render",
        "test/timeseries.csv",
        "--chart-type",
        "line",
        "--label",
        "month",
        "--value",
        "temperature",
    ]);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("#4682B4"));
    assert!(svg.contains("Jan"));
    assert_eq!(count(&svg, "<rect"), 1);
}

#[test]
fn test_end_to_end_pie_chart() {
    let svg = render_svg(&[
        "render",
        "test/pie.csv",
        "--chart-type",
        "Pie Chart",
        "--label",
        "browser",
        "--value",
        "share",
    ]);
    assert!(svg.contains("width=\"500\""));
    assert!(svg.contains("height=\"500\""));
    assert_eq!(count(&svg, "<polygon"), 3);
    assert!(svg.contains("Chrome: 65"));
}

#[test]
fn test_end_to_end_scatter_skips_missing_values() {
    let svg = render_svg(&[
        "render",
        "test/scatter.csv",
        "--chart-type",
        "Scatter",
        "--label",
        "sample",
        "--value",
        "weight",
    ]);
    assert_eq!(count(&svg, "<circle"), 4);
}

#[test]
fn test_stdin_input_and_output_file() {
    let dir = std::env::temp_dir().join(format!("chartwise-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("chart.svg");

    let output = run_chartwise(
        &[
            "render",
            "-",
            "--chart-type",
            "Bar",
            "--label",
            "name",
            "--value",
            "score",
            "--output",
            out_path.to_str().unwrap(),
        ],
        Some("name,score\nA,10\nB,5\n"),
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let svg = fs::read_to_string(&out_path).unwrap();
    assert_eq!(count(&svg, "<rect"), 3);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_without_columns_lists_them() {
    let output = run_chartwise(&["render", "test/bar_chart.csv", "--chart-type", "Bar"], None);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Columns: region, sales, units");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Suggested Chart: Bar"));
}

#[test]
fn test_unsupported_suggestion_draws_nothing() {
    let output = run_chartwise(
        &[
            "render",
            "test/bar_chart.csv",
            "--chart-type",
            "Histogram",
            "--label",
            "region",
            "--value",
            "sales",
        ],
        None,
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Histogram (unsupported)"));
}

#[test]
fn test_error_header_only_csv() {
    let output = run_chartwise(
        &["render", "test/header_only.csv", "--chart-type", "Bar"],
        None,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error parsing CSV file"));
}

#[test]
fn test_error_unknown_column() {
    let output = run_chartwise(
        &[
            "render",
            "test/bar_chart.csv",
            "--chart-type",
            "Bar",
            "--label",
            "region",
            "--value",
            "revenue",
        ],
        None,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown column 'revenue'"));
}

#[test]
fn test_error_unreachable_advisor() {
    let output = run_chartwise(
        &[
            "render",
            "test/bar_chart.csv",
            "--advisor-url",
            "http://127.0.0.1:9",
        ],
        None,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error fetching chart suggestions"));
}

#[test]
fn test_error_missing_file() {
    let output = run_chartwise(&["render", "test/does_not_exist.csv"], None);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read CSV file"));
}
