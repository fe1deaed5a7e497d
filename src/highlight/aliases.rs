// Language name aliases for syntax lookup
//
// Badge text is whatever the caller passed; these aliases only widen the
// search so "ts", "sh" or "yml" still land on a real grammar.

pub(crate) fn language_aliases(token: &str) -> Vec<String> {
    let lower = token.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    push_aliases(&mut out, aliases_for(&lower));
    push_aliases(&mut out, &[&lower]);
    out
}

fn push_aliases(out: &mut Vec<String>, aliases: &[&str]) {
    for alias in aliases {
        if alias.is_empty() || out.iter().any(|current| current == alias) {
            continue;
        }
        out.push((*alias).to_string());
    }
}

fn aliases_for(token: &str) -> &'static [&'static str] {
    match token {
        // syntect's default set has no TypeScript grammar; JavaScript is close enough
        "ts" | "typescript" => &["typescript", "ts", "javascript", "js"],
        "tsx" => &["tsx", "typescript", "jsx", "javascript", "js"],
        "js" | "javascript" | "mjs" | "cjs" => &["javascript", "js"],
        "jsx" => &["jsx", "javascript", "js"],

        "html" | "htm" => &["html", "htm"],
        "svg" => &["svg", "xml"],
        "scss" | "sass" | "less" => &["scss", "css"],

        "json" | "jsonc" | "json5" => &["json"],
        "yaml" | "yml" => &["yaml", "yml"],
        "ini" | "cfg" | "conf" => &["ini", "cfg", "conf"],

        "sh" | "shell" | "bash" | "zsh" | "ksh" | "console" => &["bash", "sh"],
        "fish" => &["fish", "bash", "sh"],
        "bat" | "cmd" => &["bat", "cmd"],

        "rs" | "rust" => &["rust", "rs"],
        "py" | "python" => &["python", "py"],
        "rb" | "ruby" => &["ruby", "rb"],
        "go" | "golang" => &["go"],
        "c++" | "cpp" | "cxx" | "hpp" => &["cpp", "c++"],
        "cs" | "csharp" | "c#" => &["cs", "c#"],
        "kt" | "kotlin" => &["kotlin", "kt", "java"],

        "md" | "markdown" | "mdx" => &["markdown", "md"],
        "txt" | "text" | "plain" | "plaintext" => &["txt"],

        _ => &[],
    }
}
