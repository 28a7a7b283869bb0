//! Caption sanitizer: strips mentions, links and invites from filenames and
//! captions before a post is republished.

use std::sync::OnceLock;

use regex::Regex;

use crate::formatting::human_size;

/// Stands in for the kept handle while the stripping rules run.
const PLACEHOLDER: &str = "KEEP__USERNAME";

struct Patterns {
    mention: Regex,
    url: Regex,
    invite: Regex,
    disallowed: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        mention: Regex::new(r"@\w+").expect("static regex"),
        // A bare domain takes its path with it, so `t.me/+code` goes away whole.
        url: Regex::new(r"https?://\S+|www\.\S+|\S+\.(com|in|net|org|me|info)(/\S*)?")
            .expect("static regex"),
        invite: Regex::new(r"t\.me/\S+").expect("static regex"),
        disallowed: Regex::new(r"[^\w\s.\-()_]").expect("static regex"),
        whitespace: Regex::new(r"\s{2,}").expect("static regex"),
    })
}

fn strip_once(text: &str) -> String {
    let p = patterns();
    let out = p.mention.replace_all(text, "");
    let out = p.url.replace_all(&out, "");
    let out = p.invite.replace_all(&out, "");
    let out = p.disallowed.replace_all(&out, "");
    let out = p.whitespace.replace_all(&out, " ");
    out.trim().to_string()
}

#[derive(Clone, Debug)]
pub struct CaptionSanitizer {
    keep_username: String,
}

impl CaptionSanitizer {
    pub fn new(keep_username: impl Into<String>) -> Self {
        Self {
            keep_username: keep_username.into(),
        }
    }

    /// Strip promotional noise, keeping the configured handle intact.
    ///
    /// Total and deterministic; may return an empty string. Dropping a
    /// disallowed character can splice a new link together (`www!.x.xyz`),
    /// so the rules are reapplied until nothing changes. Every pass that
    /// changes the text shortens it, which bounds the loop.
    pub fn sanitize(&self, text: &str) -> String {
        let mut out = if self.keep_username.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.keep_username, PLACEHOLDER)
        };
        loop {
            let next = strip_once(&out);
            if next == out {
                break;
            }
            out = next;
        }
        out.replace(PLACEHOLDER, &self.keep_username)
    }

    /// Repost caption for a named media attachment.
    pub fn build_caption(&self, file_name: &str, human_size: &str) -> String {
        let name = self.sanitize(file_name);
        format!(
            "{name}\n\
             ⚙️ 𝚂𝚒𝚣𝚎 ~ [{human_size}]\n\
             ⚜️ 𝙿𝚘𝚜𝚝 𝚋𝚢 ~ 𝐌𝐎𝐕𝐈𝐄 𝐓𝐀𝐋𝐊\n\
             \n\
             ⚡𝖩𝗈𝗂𝗇 Us ~ ❤️\n\
             ➦『 {keep} 』",
            keep = self.keep_username
        )
    }

    /// [`Self::build_caption`] with the size formatted from a raw byte count.
    pub fn media_caption(&self, file_name: &str, size_bytes: u64) -> String {
        self.build_caption(file_name, &human_size(size_bytes))
    }
}
