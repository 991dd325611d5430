use super::*;
use crate::lang::python::PythonAdapter;
use approx::assert_relative_eq;

fn measure(source: &str) -> FileMeasurements {
    TreeSitterMetricsProvider
        .measure(source)
        .expect("tree-sitter metrics")
}

fn complexity_of(measurements: &FileMeasurements, name: &str) -> u32 {
    measurements
        .blocks
        .iter()
        .find(|block| block.name == name)
        .map(|block| block.complexity)
        .unwrap_or_else(|| panic!("no block named {name}"))
}

fn parse(source: &str) -> SourceFile {
    PythonAdapter::new()
        .unwrap()
        .parse_source(source, "sample.py")
        .unwrap()
}

struct FailingProvider;

impl MetricsProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn measure(&self, _source: &str) -> Result<FileMeasurements> {
        Err(ModlensError::metrics_from("failing", "engine unavailable"))
    }
}

#[test]
fn test_straight_line_function_has_complexity_one() {
    let measurements = measure("def f():\n    return 1\n");
    assert_eq!(measurements.blocks.len(), 1);
    assert_eq!(measurements.blocks[0].kind, BlockKind::Function);
    assert_eq!(measurements.blocks[0].line, 1);
    assert_eq!(measurements.blocks[0].complexity, 1);
}

#[test]
fn test_branches_loops_and_boolean_operators() {
    let measurements = measure(
        r#"
def branchy(x, items):
    if x > 0 and x < 10:
        return 1
    elif x < 0:
        return -1
    else:
        for item in items:
            pass
        else:
            pass
    return 0
"#,
    );
    // if, and, elif, for, for-else
    assert_eq!(complexity_of(&measurements, "branchy"), 6);
}

#[test]
fn test_exception_handlers_and_try_else() {
    let measurements = measure(
        r#"
def guarded():
    try:
        work()
    except ValueError:
        pass
    except (KeyError, TypeError):
        pass
    else:
        done()
    finally:
        cleanup()
"#,
    );
    assert_eq!(complexity_of(&measurements, "guarded"), 4);
}

#[test]
fn test_comprehensions_conditionals_and_asserts() {
    let measurements = measure(
        r#"
def mixed(values):
    assert values
    evens = [v for v in values if v % 2 == 0]
    label = "many" if len(evens) > 3 else "few"
    while evens:
        evens.pop()
    return label
"#,
    );
    assert_eq!(complexity_of(&measurements, "mixed"), 6);
}

#[test]
fn test_nested_function_is_its_own_block() {
    let measurements = measure(
        r#"
def outer(flag):
    def inner(value):
        if value:
            return 1
        return 0
    if flag:
        return inner(1)
    return inner(0)
"#,
    );

    let names: Vec<_> = measurements.blocks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["outer", "inner"]);
    assert_eq!(complexity_of(&measurements, "outer"), 2);
    assert_eq!(complexity_of(&measurements, "inner"), 2);
    assert!(measurements
        .blocks
        .iter()
        .all(|b| b.kind == BlockKind::Function));
}

#[test]
fn test_class_block_sums_method_decision_points() {
    let measurements = measure(
        r#"
class Machine:
    mode = "fast" if FAST else "slow"

    def start(self):
        if self.ready:
            return True
        return False

    @staticmethod
    def stop():
        pass
"#,
    );

    let kinds: Vec<_> = measurements
        .blocks
        .iter()
        .map(|b| (b.name.as_str(), b.kind, b.complexity))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Machine", BlockKind::Class, 3),
            ("start", BlockKind::Method, 2),
            ("stop", BlockKind::Method, 1),
        ]
    );
}

#[test]
fn test_raw_counts() {
    let source = [
        "\"\"\"Module docstring.\"\"\"",
        "",
        "# leading comment",
        "import os",
        "",
        "",
        "def f():",
        "    \"\"\"Function",
        "    docstring.\"\"\"",
        "    x = 1  # inline",
        "    return x",
    ]
    .join("\n")
        + "\n";

    let raw = measure(&source).raw;
    assert_eq!(raw.loc, 11);
    assert_eq!(raw.sloc, 4);
    assert_eq!(raw.multi, 3);
    assert_eq!(raw.blank, 3);
    assert_eq!(raw.single_comments, 1);
    assert_eq!(raw.comments, 2);
}

#[test]
fn test_maintainability_index_formula() {
    assert_relative_eq!(
        maintainability_index(100.0, 5.0, 20, 0.0),
        56.9428,
        epsilon = 1e-3
    );
    assert_relative_eq!(
        maintainability_index(100.0, 5.0, 20, 50.0),
        86.0160,
        epsilon = 1e-2
    );
}

#[test]
fn test_maintainability_index_bounds() {
    assert_eq!(maintainability_index(0.0, 3.0, 10, 0.0), 100.0);
    assert_eq!(maintainability_index(50.0, 3.0, 0, 0.0), 100.0);
    assert_eq!(maintainability_index(1e300, 500.0, 100_000, 0.0), 0.0);
}

#[test]
fn test_operator_free_file_is_fully_maintainable() {
    let measurements = measure("def f():\n    return g()\n");
    assert_eq!(measurements.halstead.volume, 0.0);
    assert_eq!(measurements.maintainability_index, 100.0);
}

#[test]
fn test_code_metrics_average_and_max() {
    let metrics = CodeMetrics::from_measurements(measure(
        r#"
def simple():
    pass

def branching(x):
    if x:
        return 1
    elif x is None:
        return 2
    return 3
"#,
    ));

    assert_eq!(metrics.max_complexity, 3);
    assert_relative_eq!(metrics.average_complexity, 2.0);
}

#[test]
fn test_empty_file_metrics() {
    let metrics = CodeMetrics::from_measurements(measure(""));
    assert!(metrics.blocks.is_empty());
    assert_eq!(metrics.average_complexity, 0.0);
    assert_eq!(metrics.max_complexity, 0);
    assert_eq!(metrics.maintainability_index, 100.0);
}

#[test]
fn test_adapter_attaches_first_matching_block() {
    let mut file = parse(
        r#"
class A:
    def run(self):
        if self.ok:
            pass

class B:
    def run(self):
        pass
"#,
    );

    let metrics = MetricsAdapter::default().measure(&mut file);
    assert_eq!(metrics.blocks.len(), 4);
    assert!(file.functions.iter().all(|f| f.complexity == 2));
}

#[test]
fn test_adapter_zeroes_metrics_when_provider_fails() {
    let mut file = parse("def f(x):\n    if x:\n        return 1\n");
    file.functions[0].complexity = 7;

    let adapter = MetricsAdapter::new(Arc::new(FailingProvider));
    let metrics = adapter.measure(&mut file);

    assert_eq!(adapter.provider_name(), "failing");
    assert_eq!(metrics, CodeMetrics::default());
    assert_eq!(file.functions[0].complexity, 0);
}

#[test]
fn test_file_metrics_assembly() {
    let mut file = parse("def f(x):\n    if x:\n        return 1\n");
    let metrics = MetricsAdapter::default().measure(&mut file);
    let summary = FileMetrics::assemble(&metrics, file.function_count(), file.class_count(), 1.0);

    assert_eq!(summary.function_count, 1);
    assert_eq!(summary.class_count, 0);
    assert_eq!(summary.sloc, 3);
    assert_eq!(summary.max_complexity, 2);
    assert_eq!(summary.cohesion, 1.0);
}
