//! Text to command. One table per context plus a shared base table; the
//! context's own table is tried first, then the base, and an unmatched word
//! is rejected with a message naming the context it was typed in.

use url::Url;

use crate::commands::{AddArgs, AddTarget, Command};
use crate::error::ParseError;
use crate::model::Context;
use crate::models::EntryPatch;
use crate::search::SearchPredicate;

type ParseFn = fn(Args, &'static str) -> Result<Command, ParseError>;

struct CommandSpec {
    word: &'static str,
    alias: &'static str,
    usage: &'static str,
    blurb: &'static str,
    parse: ParseFn,
}

const BASE: &[CommandSpec] = &[
    CommandSpec {
        word: "help",
        alias: "h",
        usage: "help",
        blurb: "show the commands accepted here",
        parse: p_help,
    },
    CommandSpec {
        word: "history",
        alias: "hist",
        usage: "history",
        blurb: "show the command log",
        parse: p_history,
    },
    CommandSpec {
        word: "undo",
        alias: "",
        usage: "undo",
        blurb: "roll the active store back one change",
        parse: p_undo,
    },
    CommandSpec {
        word: "redo",
        alias: "",
        usage: "redo",
        blurb: "roll the active store forward one change",
        parse: p_redo,
    },
    CommandSpec {
        word: "list",
        alias: "ls",
        usage: "list",
        blurb: "switch to the reading list",
        parse: p_switch_list,
    },
    CommandSpec {
        word: "archives",
        alias: "",
        usage: "archives",
        blurb: "switch to the archives",
        parse: p_switch_archives,
    },
    CommandSpec {
        word: "feeds",
        alias: "",
        usage: "feeds",
        blurb: "switch to the subscribed feeds",
        parse: p_switch_feeds,
    },
    CommandSpec {
        word: "add",
        alias: "a",
        usage: "add <url | index> [--title <text>] [--desc <text>] [--tag <tag>]...",
        blurb: "add an entry to the reading list",
        parse: p_add,
    },
    CommandSpec {
        word: "subscribe",
        alias: "sub",
        usage: "subscribe <url> [--title <text>]",
        blurb: "subscribe to a feed and import its articles",
        parse: p_subscribe,
    },
    CommandSpec {
        word: "search",
        alias: "",
        usage: "search <keyword>...",
        blurb: "collect matching entries into the search view",
        parse: p_search,
    },
    CommandSpec {
        word: "exit",
        alias: "q",
        usage: "exit",
        blurb: "quit",
        parse: p_exit,
    },
];

const LIST: &[CommandSpec] = &[
    CommandSpec {
        word: "archive",
        alias: "arc",
        usage: "archive <index>",
        blurb: "move an entry to the archives",
        parse: p_archive,
    },
    CommandSpec {
        word: "archiveall",
        alias: "",
        usage: "archiveall",
        blurb: "archive every displayed entry",
        parse: p_archive_all,
    },
    CommandSpec {
        word: "delete",
        alias: "del",
        usage: "delete <index>",
        blurb: "delete an entry",
        parse: p_delete,
    },
    CommandSpec {
        word: "deleteall",
        alias: "",
        usage: "deleteall",
        blurb: "delete every displayed entry",
        parse: p_delete_all,
    },
    CommandSpec {
        word: "edit",
        alias: "",
        usage: "edit <index> [--title <text>] [--desc <text>] [--link <url>] [--tag <tag>]...",
        blurb: "change the supplied fields of an entry",
        parse: p_edit,
    },
    CommandSpec {
        word: "find",
        alias: "",
        usage: "find [<keyword>...] [--title <text>] [--desc <text>] [--link <text>] [--tag <tag>]...",
        blurb: "filter the displayed list",
        parse: p_find,
    },
    CommandSpec {
        word: "refresh",
        alias: "ref",
        usage: "refresh <index>",
        blurb: "re-fetch an entry's page",
        parse: p_refresh,
    },
    CommandSpec {
        word: "refreshall",
        alias: "",
        usage: "refreshall",
        blurb: "refresh every displayed entry, top-down",
        parse: p_refresh_all,
    },
    CommandSpec {
        word: "select",
        alias: "sel",
        usage: "select <index>",
        blurb: "select an entry",
        parse: p_select,
    },
    CommandSpec {
        word: "view",
        alias: "",
        usage: "view [index]",
        blurb: "show the selected (or indexed) entry",
        parse: p_view,
    },
    CommandSpec {
        word: "clear",
        alias: "",
        usage: "clear",
        blurb: "empty the reading list",
        parse: p_clear,
    },
];

const ARCHIVES: &[CommandSpec] = &[
    CommandSpec {
        word: "delete",
        alias: "del",
        usage: "delete <index>",
        blurb: "delete an archived entry",
        parse: p_delete,
    },
    CommandSpec {
        word: "deleteall",
        alias: "",
        usage: "deleteall",
        blurb: "delete every displayed entry",
        parse: p_delete_all,
    },
    CommandSpec {
        word: "find",
        alias: "",
        usage: "find [<keyword>...] [--title <text>] [--desc <text>] [--link <text>] [--tag <tag>]...",
        blurb: "filter the displayed list",
        parse: p_find,
    },
    CommandSpec {
        word: "select",
        alias: "sel",
        usage: "select <index>",
        blurb: "select an entry",
        parse: p_select,
    },
    CommandSpec {
        word: "unarchive",
        alias: "unarc",
        usage: "unarchive <index>",
        blurb: "move an entry back to the reading list",
        parse: p_unarchive,
    },
    CommandSpec {
        word: "unarchiveall",
        alias: "",
        usage: "unarchiveall",
        blurb: "move every displayed entry back",
        parse: p_unarchive_all,
    },
    CommandSpec {
        word: "clear",
        alias: "",
        usage: "clear",
        blurb: "empty the archives",
        parse: p_clear,
    },
];

const FEEDS: &[CommandSpec] = &[
    CommandSpec {
        word: "refresh",
        alias: "ref",
        usage: "refresh <index>",
        blurb: "re-fetch one feed and import new articles",
        parse: p_refresh,
    },
    CommandSpec {
        word: "refreshall",
        alias: "",
        usage: "refreshall",
        blurb: "refresh every displayed feed, top-down",
        parse: p_refresh_all,
    },
    CommandSpec {
        word: "unsubscribe",
        alias: "unsub",
        usage: "unsubscribe <index>",
        blurb: "drop a subscription",
        parse: p_unsubscribe,
    },
    CommandSpec {
        word: "clear",
        alias: "",
        usage: "clear",
        blurb: "drop every subscription",
        parse: p_clear,
    },
];

const SEARCH: &[CommandSpec] = &[
    CommandSpec {
        word: "addall",
        alias: "",
        usage: "addall",
        blurb: "add every result to the reading list",
        parse: p_add_all,
    },
    CommandSpec {
        word: "select",
        alias: "sel",
        usage: "select <index>",
        blurb: "select a result",
        parse: p_select,
    },
    CommandSpec {
        word: "view",
        alias: "",
        usage: "view [index]",
        blurb: "show the selected (or indexed) result",
        parse: p_view,
    },
];

fn context_table(context: Context) -> &'static [CommandSpec] {
    match context {
        Context::List => LIST,
        Context::Archives => ARCHIVES,
        Context::Feeds => FEEDS,
        Context::Search => SEARCH,
    }
}

pub fn parse(context: Context, line: &str) -> Result<Command, ParseError> {
    let mut tokens = tokenize(line);
    if tokens.is_empty() {
        return Err(ParseError::UnknownCommand {
            word: String::new(),
            context,
        });
    }
    let word = tokens.remove(0);
    let spec = context_table(context)
        .iter()
        .chain(BASE.iter())
        .find(|s| s.word == word || (!s.alias.is_empty() && s.alias == word))
        .ok_or_else(|| ParseError::UnknownCommand {
            word: word.clone(),
            context,
        })?;
    let args = collect_args(tokens, spec.usage)?;
    (spec.parse)(args, spec.usage)
}

/// One help line per command accepted in `context`.
pub fn help_text(context: Context) -> String {
    let mut out = format!("commands in the {context} view:\n");
    for spec in context_table(context).iter().chain(BASE.iter()) {
        out.push_str(&format!("  {:<28} {}\n", spec.word, spec.blurb));
    }
    out.push_str("\nusage:\n");
    for spec in context_table(context).iter().chain(BASE.iter()) {
        out.push_str(&format!("  {}\n", spec.usage));
    }
    out.trim_end().to_owned()
}

/// Whitespace split with double quotes grouping words. An unterminated
/// quote runs to the end of the line.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[derive(Debug, Default)]
struct Args {
    positional: Vec<String>,
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    tags: Vec<String>,
}

fn collect_args(tokens: Vec<String>, usage: &'static str) -> Result<Args, ParseError> {
    let mut args = Args::default();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--title" | "-t" => args.title = Some(flag_value(&mut iter, usage)?),
            "--desc" | "-d" => args.description = Some(flag_value(&mut iter, usage)?),
            "--link" | "-l" => args.link = Some(flag_value(&mut iter, usage)?),
            "--tag" | "-g" => args.tags.push(flag_value(&mut iter, usage)?),
            _ if token.starts_with('-') && token.len() > 1 => {
                return Err(ParseError::BadValue {
                    reason: format!("unrecognized flag `{token}`"),
                    usage,
                })
            }
            _ => args.positional.push(token),
        }
    }
    Ok(args)
}

fn flag_value(
    iter: &mut impl Iterator<Item = String>,
    usage: &'static str,
) -> Result<String, ParseError> {
    iter.next().ok_or(ParseError::MissingArg { usage })
}

fn parse_index(token: &str, usage: &'static str) -> Result<usize, ParseError> {
    token
        .parse::<usize>()
        .ok()
        .filter(|i| *i >= 1)
        .ok_or_else(|| ParseError::BadIndex {
            got: token.to_owned(),
            usage,
        })
}

fn parse_url(token: &str, usage: &'static str) -> Result<Url, ParseError> {
    Url::parse(token).map_err(|_| ParseError::BadValue {
        reason: format!("`{token}` is not a valid absolute url"),
        usage,
    })
}

fn required_index(args: &Args, usage: &'static str) -> Result<usize, ParseError> {
    let token = args
        .positional
        .first()
        .ok_or(ParseError::MissingArg { usage })?;
    parse_index(token, usage)
}

fn p_help(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Help)
}

fn p_history(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::History)
}

fn p_undo(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Undo)
}

fn p_redo(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Redo)
}

fn p_exit(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Exit)
}

fn p_switch_list(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Switch(Context::List))
}

fn p_switch_archives(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Switch(Context::Archives))
}

fn p_switch_feeds(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Switch(Context::Feeds))
}

fn p_search(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let keyword = args.positional.join(" ");
    if keyword.trim().is_empty() {
        return Err(ParseError::EmptyQuery { usage });
    }
    Ok(Command::Search(SearchPredicate::keyword(keyword)))
}

fn p_add(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let first = args
        .positional
        .first()
        .ok_or(ParseError::MissingArg { usage })?;
    let target = if first.chars().all(|c| c.is_ascii_digit()) {
        AddTarget::Index(parse_index(first, usage)?)
    } else {
        AddTarget::Link(parse_url(first, usage)?)
    };
    Ok(Command::Add(AddArgs {
        target,
        title: args.title,
        description: args.description,
        tags: args.tags.into_iter().collect(),
    }))
}

fn p_add_all(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::AddAll)
}

fn p_subscribe(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let first = args
        .positional
        .first()
        .ok_or(ParseError::MissingArg { usage })?;
    Ok(Command::Subscribe {
        link: parse_url(first, usage)?,
        title: args.title,
    })
}

fn p_unsubscribe(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Unsubscribe {
        index: required_index(&args, usage)?,
    })
}

fn p_delete(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Delete {
        index: required_index(&args, usage)?,
    })
}

fn p_delete_all(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::DeleteAll)
}

fn p_archive(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Archive {
        index: required_index(&args, usage)?,
    })
}

fn p_archive_all(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::ArchiveAll)
}

fn p_unarchive(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Unarchive {
        index: required_index(&args, usage)?,
    })
}

fn p_unarchive_all(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::UnarchiveAll)
}

fn p_refresh(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Refresh {
        index: required_index(&args, usage)?,
    })
}

fn p_refresh_all(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::RefreshAll)
}

fn p_edit(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let index = required_index(&args, usage)?;
    let link = match &args.link {
        Some(raw) => Some(parse_url(raw, usage)?),
        None => None,
    };
    let patch = EntryPatch {
        title: args.title,
        description: args.description,
        link,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags.into_iter().collect())
        },
    };
    if patch.is_empty() {
        return Err(ParseError::MissingArg { usage });
    }
    Ok(Command::Edit { index, patch })
}

fn p_select(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Select {
        index: required_index(&args, usage)?,
    })
}

fn p_view(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let index = match args.positional.first() {
        Some(token) => Some(parse_index(token, usage)?),
        None => None,
    };
    Ok(Command::View { index })
}

fn p_clear(_: Args, _: &'static str) -> Result<Command, ParseError> {
    Ok(Command::Clear)
}

fn p_find(args: Args, usage: &'static str) -> Result<Command, ParseError> {
    let all = Some(args.positional.join(" ")).filter(|s| !s.trim().is_empty());
    SearchPredicate::from_parts(
        args.title,
        args.description,
        args.link,
        args.tags.into_iter().collect(),
        all,
    )
    .map(Command::Find)
    .ok_or(ParseError::EmptyQuery { usage })
}
