use std::sync::OnceLock;

use regex::Regex;
use serenity::all::{ChannelId, Context, UserId};

use crate::nay;

/// How a message addressed the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsedPrefix {
    Text,
    Mention,
}

/// A message split into the command word and the rest of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub used: UsedPrefix,
    pub name: &'a str,
    pub args: &'a str,
}

fn mention_pattern() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    MENTION.get_or_init(|| Regex::new(r"^<@!?(\d+)>").expect("mention pattern is valid"))
}

/// Length of a leading mention of `user`, if `text` starts with one.
fn leading_mention_len(text: &str, user: UserId) -> Option<usize> {
    let caps = mention_pattern().captures(text)?;
    let id = caps.get(1)?.as_str().parse::<u64>().ok()?;
    if id != user.get() {
        return None;
    }
    Some(caps.get(0)?.end())
}

/// Split off the first whitespace-delimited word.
pub fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim_start()),
        None => (text, ""),
    }
}

/// Parse a message addressed to the bot either with `prefix` or with a
/// mention of the bot itself.
pub fn parse_invocation<'a>(content: &'a str, prefix: &str, bot: UserId) -> Option<Invocation<'a>> {
    let (used, rest) = if let Some(end) = leading_mention_len(content, bot) {
        (UsedPrefix::Mention, &content[end..])
    } else {
        (UsedPrefix::Text, content.strip_prefix(prefix)?)
    };

    let (name, args) = split_word(rest);
    if name.is_empty() {
        return None;
    }

    Some(Invocation {
        used,
        name,
        args: args.trim_end(),
    })
}

/// Prefixes starting with a mention of the bot would shadow the mention prefix.
pub fn is_reserved_prefix(candidate: &str, bot: UserId) -> bool {
    leading_mention_len(candidate, bot).is_some()
}

/// The prefix as users should type it.
pub fn clean_prefix(used: UsedPrefix, prefix: &str, bot_name: &str) -> String {
    match used {
        UsedPrefix::Text => prefix.to_string(),
        UsedPrefix::Mention => format!("@{} ", bot_name),
    }
}

pub async fn channel_response<S: Into<String>>(ctx: &Context, channel: ChannelId, msg: S) {
    if let Err(err) = channel.say(&ctx.http, msg.into()).await {
        nay!("Failed to respond to command: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOT: UserId = UserId::new(734416043266670703);

    #[test]
    fn text_prefix_splits_name_and_args() {
        assert_eq!(
            parse_invocation("!help prefix set ", "!", BOT),
            Some(Invocation {
                used: UsedPrefix::Text,
                name: "help",
                args: "prefix set",
            })
        );
        assert_eq!(parse_invocation("help", "!", BOT), None);
        assert_eq!(parse_invocation("!", "!", BOT), None);
    }

    #[test]
    fn mentions_of_the_bot_work_as_prefix() {
        for content in ["<@734416043266670703> help", "<@!734416043266670703>   help"] {
            let invocation = parse_invocation(content, "!", BOT).unwrap();
            assert_eq!(invocation.used, UsedPrefix::Mention);
            assert_eq!(invocation.name, "help");
            assert_eq!(invocation.args, "");
        }

        assert_eq!(parse_invocation("<@1234> help", "!", BOT), None);
    }

    #[test]
    fn multi_character_prefixes() {
        let invocation = parse_invocation("mb!echo  hi there", "mb!", BOT).unwrap();
        assert_eq!(invocation.name, "echo");
        assert_eq!(invocation.args, "hi there");
    }

    #[test]
    fn bot_mentions_are_reserved() {
        assert!(is_reserved_prefix("<@734416043266670703>", BOT));
        assert!(is_reserved_prefix("<@!734416043266670703>?", BOT));
        assert!(!is_reserved_prefix("<@42>", BOT));
        assert!(!is_reserved_prefix("?", BOT));
    }

    #[test]
    fn clean_prefix_names_the_bot_for_mentions() {
        assert_eq!(clean_prefix(UsedPrefix::Text, "?", "Pager"), "?");
        assert_eq!(clean_prefix(UsedPrefix::Mention, "?", "Pager"), "@Pager ");
    }

    #[test]
    fn split_word_handles_surrounding_space() {
        assert_eq!(split_word("  set  $ "), ("set", "$ "));
        assert_eq!(split_word("reset"), ("reset", ""));
        assert_eq!(split_word(""), ("", ""));
    }
}
