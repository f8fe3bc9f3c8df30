use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("campus-cli").chain(args.iter().copied())).unwrap()
}

#[test]
fn global_flags_precede_the_command() {
    let cli = parse(&["--base-url", "http://api.test", "--no-refresh", "whoami"]);

    assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
    assert!(cli.no_refresh);
    assert!(matches!(cli.command, Command::Whoami));
}

#[test]
fn course_list_takes_paging_and_search() {
    let cli = parse(&["courses", "list", "--page", "3", "--search", "algebra"]);

    let Command::Courses(CourseCommand { command: CourseSubcommand::List(list) }) = cli.command else {
        panic!("expected courses list, got {:?}", cli.command);
    };
    assert_eq!(list.page, 3);
    assert_eq!(list.search.as_deref(), Some("algebra"));
    assert_eq!(list.limit, None);
}

#[test]
fn syllabus_list_filters_by_course() {
    let cli = parse(&["syllabi", "list", "--course", "7"]);

    let Command::Syllabi(SyllabusCommand { command: SyllabusSubcommand::List { list, course } }) = cli.command
    else {
        panic!("expected syllabi list, got {:?}", cli.command);
    };
    assert_eq!(course, Some(7));
    assert_eq!(list.page, 1);
}

#[test]
fn syllabus_update_parses_active_flag() {
    let cli = parse(&["syllabi", "update", "4", "--active", "false"]);

    let Command::Syllabi(SyllabusCommand { command: SyllabusSubcommand::Update { id, version, active } }) =
        cli.command
    else {
        panic!("expected syllabi update, got {:?}", cli.command);
    };
    assert_eq!((id, version, active), (4, None, Some(false)));
}

#[test]
fn upload_requires_a_course() {
    let err = Cli::try_parse_from(["campus-cli", "syllabi", "upload", "outline.pdf"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn department_delete_needs_numeric_id() {
    let err = Cli::try_parse_from(["campus-cli", "departments", "delete", "physics"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}
