use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::Context;
use crate::error::{Error, ErrorKind, Result};

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, i64) -> ActionResult),
}

/// `[count]name[ argument]`
fn command(input: &str) -> IResult<&str, (Option<&str>, &str, Option<&str>)> {
    all_consuming(tuple((opt(digit1), alpha1, opt(preceded(space1, rest)))))(input)
}

fn lookup(name: &str) -> Result<&'static Action> {
    COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, act)| act)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::Command,
                &format!("'{}' (type 'help' for a list of commands)", name),
            )
        })
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> ActionResult {
        let cmd = cmd.trim();
        if cmd.is_empty() {
            return Ok(());
        }

        let (_, (repeat, name, arg)) = command(cmd)?;
        let act = lookup(name)?;
        let unexpected = || Error::new(ErrorKind::Command, &format!("'{}' takes no such argument", name));

        match act {
            Action::Repeatable(a) => {
                if arg.is_some() {
                    return Err(unexpected());
                }
                // digit1 only yields digits, so a failed parse means overflow.
                let repeats = repeat.map_or(1, |digits| digits.parse::<i64>().unwrap_or(i64::MAX));
                a(self.context, repeats)
            }
            Action::Arg(a) if repeat.is_none() => a(self.context, arg.unwrap_or("")),
            Action::NoArg(a) if repeat.is_none() && arg.is_none() => a(self.context),
            _ => Err(unexpected()),
        }
    }
}

pub const HELP: &str = "[N]n/[N]p: next/previous month  today  d <day|YYYY-MM-DD>: show event  \
s <text>: search  x: dismiss  t <text>: add task  td <N>: delete task  q: quit";

const COMMANDS: &[(&str, Action)] = &[
    (
        "n",
        Action::Repeatable(|c, p| {
            c.navigate(p);
            Ok(())
        }),
    ),
    (
        "p",
        Action::Repeatable(|c, p| {
            c.navigate(-p);
            Ok(())
        }),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.go_to_today();
            Ok(())
        }),
    ),
    ("d", Action::Arg(|c, arg| c.activate_day(arg))),
    ("s", Action::Arg(|c, arg| c.search(arg))),
    (
        "x",
        Action::NoArg(|c| {
            c.dismiss();
            Ok(())
        }),
    ),
    ("t", Action::Arg(|c, arg| c.add_todo(arg))),
    ("td", Action::Arg(|c, arg| c.delete_todo(arg))),
    (
        "help",
        Action::NoArg(|c| {
            c.notice = Some(HELP.to_owned());
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];
