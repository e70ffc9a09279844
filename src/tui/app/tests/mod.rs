pub(crate) use super::*;
pub(crate) use crate::runner::testing::FakeRunner;
pub(crate) use crate::tree::parse_listing;
pub(crate) use crate::Status;


pub(crate) const LISTING: &str = "\
<Module tests/test_math.py>
  <Function test_add>
  <Function test_sub>
<Module tests/io/test_files.py>
  <Function test_read>
";

/// App over [`LISTING`] with a runner that exits with `code`.
///
/// The returned runner shares its call log with the boxed one.
pub(crate) fn make_app(code: i32, output: &str) -> (App, FakeRunner) {
    make_app_with_runner(FakeRunner::exiting(code, output))
}

pub(crate) fn make_app_with_runner(runner: FakeRunner) -> (App, FakeRunner) {
    let app = App::new(parse_listing(LISTING), Box::new(runner.clone()));
    (app, runner)
}

pub(crate) fn find(app: &App, path: &str) -> NodeId {
    app.tree
        .ids()
        .find(|&id| app.tree.path(id) == path)
        .unwrap_or_else(|| panic!("no node at {path}"))
}
