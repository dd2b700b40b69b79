//! Go file selection for directory loads.
//!
//! A directory contributes only the files `go build` would compile for the
//! current target: `//go:build` lines (or legacy `// +build` lines) in the
//! file header and `_GOOS`/`_GOARCH` file name suffixes must match.
//! `GOOS`, `GOARCH` and `CGO_ENABLED` are read from the environment, with
//! the host as the fallback.

use tracing::warn;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips",
    "mipsle", "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le",
    "riscv", "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Nesting limit for parenthesized `//go:build` expressions.
const MAX_NESTING: usize = 64;

/// Target that build constraints are evaluated against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BuildContext {
    goos: String,
    goarch: String,
    cgo: bool,
}

impl BuildContext {
    pub(crate) fn new(goos: impl Into<String>, goarch: impl Into<String>, cgo: bool) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            cgo,
        }
    }

    /// `GOOS`, `GOARCH` and `CGO_ENABLED` from the environment, else the host.
    pub(crate) fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self::new(
            var("GOOS").unwrap_or_else(|| host_os().to_owned()),
            var("GOARCH").unwrap_or_else(|| host_arch().to_owned()),
            var("CGO_ENABLED").is_some_and(|v| v == "1"),
        )
    }

    /// Whether a file with this name and content belongs to the build.
    pub(crate) fn includes(&self, file_name: &str, content: &str) -> bool {
        if !self.matches_file_name(file_name) {
            return false;
        }
        let header = Header::scan(content);
        if let Some(expr) = header.go_build {
            return match self.eval_expr(expr) {
                Ok(result) => result,
                Err(reason) => {
                    warn!(file = file_name, %reason, "ignoring malformed //go:build line");
                    true
                }
            };
        }
        header.plus_build.iter().all(|line| self.eval_plus_build(line))
    }

    /// Whether a single build tag is satisfied.
    pub(crate) fn satisfies(&self, tag: &str) -> bool {
        match tag {
            "gc" => true,
            "cgo" => self.cgo,
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            // Android builds also satisfy linux, ios builds darwin, illumos solaris.
            "linux" => self.goos == "linux" || self.goos == "android",
            "darwin" => self.goos == "darwin" || self.goos == "ios",
            "solaris" => self.goos == "solaris" || self.goos == "illumos",
            _ if tag == self.goos || tag == self.goarch => true,
            _ => is_release_tag(tag),
        }
    }

    fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.strip_suffix(".go").unwrap_or(file_name);
        // The part before the first `_` never constrains the file.
        let Some(at) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[at..].split('_').collect();
        if parts.len() >= 2 && parts.last() == Some(&"test") {
            parts.pop();
        }
        match parts.as_slice() {
            [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => {
                self.satisfies(os) && self.satisfies(arch)
            }
            [.., last] if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.satisfies(last)
            }
            _ => true,
        }
    }

    fn eval_expr(&self, expr: &str) -> Result<bool, String> {
        let tokens = tokenize(expr)?;
        let mut parser = ExprParser {
            ctx: self,
            tokens: &tokens,
            pos: 0,
        };
        let result = parser.or(0)?;
        match parser.tokens.get(parser.pos) {
            None => Ok(result),
            Some(token) => Err(format!("unexpected {token:?}")),
        }
    }

    /// One `// +build` line: spaces separate alternatives, commas join terms.
    fn eval_plus_build(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) if !tag.is_empty() && !tag.starts_with('!') => !self.satisfies(tag),
                Some(_) => false,
                None => self.satisfies(term),
            })
        })
    }
}

fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}

fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        "wasm32" => "wasm",
        arch => arch,
    }
}

/// Constraint lines found before the package clause.
#[derive(Debug, Default)]
struct Header<'s> {
    go_build: Option<&'s str>,
    plus_build: Vec<&'s str>,
}

impl<'s> Header<'s> {
    fn scan(content: &'s str) -> Self {
        let mut header = Self::default();
        let mut in_block = false;
        for line in content.lines() {
            let line = line.trim();
            if in_block {
                in_block = !line.contains("*/");
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix("//") {
                if let Some(expr) = line.strip_prefix("//go:build") {
                    if header.go_build.is_none()
                        && (expr.is_empty() || expr.starts_with(char::is_whitespace))
                    {
                        header.go_build = Some(expr.trim());
                    }
                } else if let Some(tags) = comment.trim_start().strip_prefix("+build")
                    && (tags.is_empty() || tags.starts_with(char::is_whitespace))
                {
                    header.plus_build.push(tags);
                }
                continue;
            }
            if let Some(rest) = line.strip_prefix("/*") {
                in_block = !rest.contains("*/");
                continue;
            }
            break;
        }
        header
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token<'s> {
    Tag(&'s str),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while let Some(c) = rest.chars().next() {
        let (token, len) = match c {
            '!' => (Token::Not, 1),
            '(' => (Token::Open, 1),
            ')' => (Token::Close, 1),
            '&' if rest.starts_with("&&") => (Token::And, 2),
            '|' if rest.starts_with("||") => (Token::Or, 2),
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(rest.len());
                (Token::Tag(&rest[..len]), len)
            }
            other => return Err(format!("unexpected character {other:?}")),
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    Ok(tokens)
}

struct ExprParser<'a, 's> {
    ctx: &'a BuildContext,
    tokens: &'a [Token<'s>],
    pos: usize,
}

impl<'s> ExprParser<'_, 's> {
    fn or(&mut self, depth: usize) -> Result<bool, String> {
        let mut result = self.and(depth)?;
        while self.eat(&Token::Or) {
            let rhs = self.and(depth)?;
            result = result || rhs;
        }
        Ok(result)
    }

    fn and(&mut self, depth: usize) -> Result<bool, String> {
        let mut result = self.not(depth)?;
        while self.eat(&Token::And) {
            let rhs = self.not(depth)?;
            result = result && rhs;
        }
        Ok(result)
    }

    fn not(&mut self, depth: usize) -> Result<bool, String> {
        let mut negate = false;
        while self.eat(&Token::Not) {
            negate = !negate;
        }
        Ok(self.atom(depth)? != negate)
    }

    fn atom(&mut self, depth: usize) -> Result<bool, String> {
        match self.tokens.get(self.pos) {
            Some(Token::Tag(tag)) => {
                self.pos += 1;
                Ok(self.ctx.satisfies(tag))
            }
            Some(Token::Open) => {
                if depth >= MAX_NESTING {
                    return Err("expression nested too deeply".to_string());
                }
                self.pos += 1;
                let result = self.or(depth + 1)?;
                if !self.eat(&Token::Close) {
                    return Err("missing )".to_string());
                }
                Ok(result)
            }
            Some(token) => Err(format!("unexpected {token:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn eat(&mut self, token: &Token<'s>) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            return true;
        }
        false
    }
}
