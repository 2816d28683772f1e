use chrono::NaiveDate;
use std::result::Result;
use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit0, space1},
    combinator::{all_consuming, opt, rest},
    error::{Error, ErrorKind, ParseError},
    sequence::{preceded, tuple},
    Err, IResult,
};

use super::context::{Context, Mode};

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

pub fn match_action<'a, Act>(
    table: &'a [(&'static str, Act)],
) -> impl Fn(&str) -> IResult<&str, (&'static str, &'a Act)> + 'a {
    move |input: &str| {
        let (remaining, word) = alpha1::<_, Error<&str>>(input)?;
        if let Some((name, act)) = table.iter().find(|(name, _)| *name == word) {
            Ok((remaining, (*name, act)))
        } else {
            Err(Err::Error(ParseError::from_error_kind(
                input,
                ErrorKind::Tag,
            )))
        }
    }
}

fn parse_date(arg: &str) -> Result<NaiveDate, Error<String>> {
    NaiveDate::parse_from_str(arg.trim(), "%Y-%m-%d")
        .map_err(|_| Error::new(arg.to_owned(), ErrorKind::Verify))
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let cmd = cmd.trim();
        let (_, (repeat, (name, act), arg)) = all_consuming(tuple((
            digit0,
            match_action(COMMANDS),
            opt(preceded(space1, rest)),
        )))(cmd)
        .map_err(|_: Err<Error<&str>>| Error::new(cmd.to_owned(), ErrorKind::Tag))?;

        log::debug!("running command '{}'", name);

        match (act, repeat.is_empty(), arg) {
            (Action::NoArg(a), true, None) => a(self.context),
            (Action::Arg(a), true, Some(arg)) => a(self.context, arg),
            (Action::Repeatable(a), _, None) => {
                let repeats = if repeat.is_empty() {
                    1
                } else {
                    repeat
                        .parse::<u32>()
                        .map_err(|_| Error::new(repeat.to_owned(), ErrorKind::Digit))?
                };
                a(self.context, repeats)
            }
            _ => Err(Error::new(cmd.to_owned(), ErrorKind::Verify)),
        }
    }

    fn report_error(&mut self, error: Error<String>) {
        let reason = match error.code {
            ErrorKind::Tag => "unknown command",
            ErrorKind::Digit => "invalid count",
            _ => "invalid argument",
        };
        self.context.last_error_message = Some(format!("{}: {}", reason, error.input));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let cmd = self.context.command_line.finish_line().to_owned();
                    if let Err(e) = self.run_command(&cmd) {
                        self.report_error(e);
                    } else {
                        self.context.last_error_message = None;
                    }
                    self.context.mode = Mode::Normal;
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}

pub type ActionResult = Result<(), Error<String>>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

fn move_cursor(c: &mut Context, days: i64) -> ActionResult {
    if c.move_cursor(days) {
        Ok(())
    } else {
        Err(Error::new(days.to_string(), ErrorKind::Verify))
    }
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "reset",
        Action::NoArg(|c| {
            c.picker.reset_selected_dates();
            Ok(())
        }),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.goto_today();
            Ok(())
        }),
    ),
    (
        "select",
        Action::Arg(|c, arg| {
            let date = parse_date(arg)?;
            if c.layout().position_of(&date).is_none() {
                return Err(Error::new(arg.to_owned(), ErrorKind::Verify));
            }
            c.picker.click(date);
            Ok(())
        }),
    ),
    (
        "goto",
        Action::Arg(|c, arg| {
            let date = parse_date(arg)?;
            if c.set_cursor(date) {
                Ok(())
            } else {
                Err(Error::new(arg.to_owned(), ErrorKind::Verify))
            }
        }),
    ),
    ("gd", Action::Repeatable(|c, p| move_cursor(c, p as i64))),
    ("gD", Action::Repeatable(|c, p| move_cursor(c, -(p as i64)))),
    ("gw", Action::Repeatable(|c, p| move_cursor(c, 7 * p as i64))),
    ("gW", Action::Repeatable(|c, p| move_cursor(c, -7 * p as i64))),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::picker::RangePicker;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context() -> Context {
        Context::new(
            &Config::default(),
            RangePicker::with_current(ymd(2024, 5, 10)),
        )
    }

    #[test]
    fn select_command_clicks_day() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("select 2024-05-12").unwrap();
        parser.run_command("select 2024-05-20").unwrap();

        assert_eq!(
            ctx.picker.selection().as_slice(),
            &[ymd(2024, 5, 12), ymd(2024, 5, 20)]
        );
    }

    #[test]
    fn select_outside_window_is_rejected() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("select 2024-05-12").unwrap();

        let err = parser.run_command("select 2031-07-04").unwrap_err();
        assert_eq!(err.code, ErrorKind::Verify);
        assert_eq!(err.input, "2031-07-04");
        assert_eq!(ctx.picker.selection().as_slice(), &[ymd(2024, 5, 12)]);
    }

    #[test]
    fn reset_command_clears_selection() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("select 2024-05-12").unwrap();
        parser.run_command("reset").unwrap();
        assert!(ctx.picker.selection().is_empty());
    }

    #[test]
    fn repeat_count_moves_cursor() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("2gw").unwrap();
        parser.run_command("gD").unwrap();
        assert_eq!(ctx.cursor(), &ymd(2024, 5, 23));
    }

    #[test]
    fn goto_and_quit() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("goto 2024-08-01").unwrap();
        assert!(parser.run_command("goto 2030-01-01").is_err());
        parser.run_command("q").unwrap();

        assert_eq!(ctx.cursor(), &ymd(2024, 8, 1));
        assert!(ctx.quit);
    }

    #[test]
    fn malformed_commands_are_rejected() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);

        let unknown = parser.run_command("frobnicate").unwrap_err();
        assert_eq!(unknown.code, ErrorKind::Tag);

        let bad_date = parser.run_command("select tomorrow").unwrap_err();
        assert_eq!(bad_date.code, ErrorKind::Verify);

        assert!(parser.run_command("3reset").is_err());
        assert!(parser.run_command("select").is_err());
    }

    #[test]
    fn errors_are_reported_in_context() {
        let mut ctx = context();
        let mut parser = CommandParser::new(&mut ctx);
        let err = parser.run_command("frobnicate").unwrap_err();
        parser.report_error(err);
        assert_eq!(
            ctx.last_error_message.as_deref(),
            Some("unknown command: frobnicate")
        );
    }
}
