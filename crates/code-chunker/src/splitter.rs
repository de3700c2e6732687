use crate::language::{Language, SplitFamily};
use crate::types::{Unit, UnitKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Extract class/function units from file content.
///
/// Purely line-oriented heuristics: indentation tracking for Python-like
/// languages, brace counting for brace-delimited ones. Languages without a
/// rule set yield no units, which callers treat as "emit one whole-file
/// chunk". Never errors.
pub fn detect_units(content: &str, language: Language) -> Vec<Unit> {
    if content.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let offsets = line_offsets(&lines);

    match language.split_family() {
        SplitFamily::None => Vec::new(),
        SplitFamily::Indent => indent_units(content, &lines, &offsets, indent_rules(language)),
        SplitFamily::Brace => brace_units(content, &lines, &offsets, brace_rules(language)),
    }
}

/// Byte offset of the start of each line, plus one final entry one past the
/// last line. Offsets count `len(line) + 1` per preceding line so that
/// `content[offsets[i]..offsets[j]]` reproduces lines verbatim.
fn line_offsets(lines: &[&str]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(lines.len() + 1);
    let mut acc = 0usize;
    for line in lines {
        offsets.push(acc);
        acc += line.len() + 1;
    }
    offsets.push(acc);
    offsets
}

type DeclRule = (UnitKind, &'static Lazy<Regex>);

fn match_decl(trimmed: &str, rules: &[DeclRule]) -> Option<(UnitKind, String)> {
    for (kind, pattern) in rules {
        if let Some(caps) = pattern.captures(trimmed) {
            let name = caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().to_string())?;
            return Some((*kind, name));
        }
    }
    None
}

fn indent_units(
    content: &str,
    lines: &[&str],
    offsets: &[usize],
    rules: &[DeclRule],
) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim_start();
        let Some((kind, name)) = match_decl(trimmed, rules) else {
            i += 1;
            continue;
        };

        let start_indent = lines[i].len() - trimmed.len();
        let mut end_line = lines.len() - 1;
        for (j, line) in lines.iter().enumerate().skip(i + 1) {
            // Blank lines are skipped during the scan, never terminators.
            if line.trim().is_empty() {
                continue;
            }
            let indent = line.len() - line.trim_start().len();
            if indent <= start_indent {
                end_line = j - 1;
                break;
            }
        }

        units.push(Unit {
            kind,
            name,
            start_line: i,
            end_line,
            start_byte: offsets[i],
            end_byte: offsets[end_line + 1].min(content.len()),
            calls: Vec::new(),
            called_by: Vec::new(),
        });

        // Resume after the unit so nested declarations never produce an
        // overlapping span.
        i = end_line + 1;
    }

    units
}

fn brace_units(content: &str, lines: &[&str], offsets: &[usize], rules: &[DeclRule]) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim_start();
        let Some((kind, name)) = match_decl(trimmed, rules) else {
            i += 1;
            continue;
        };

        // Track brace depth character by character from the declaration line;
        // the unit ends where depth first returns to zero after opening.
        let mut end_line = i;
        let mut depth: i64 = 0;
        let mut opened = false;
        let mut closed = false;

        'scan: for (j, line) in lines.iter().enumerate().skip(i) {
            for ch in line.chars() {
                match ch {
                    '{' => {
                        depth += 1;
                        opened = true;
                    }
                    '}' => {
                        depth -= 1;
                        if opened && depth <= 0 {
                            end_line = j;
                            closed = true;
                            break 'scan;
                        }
                    }
                    _ => {}
                }
            }
        }

        // Unbalanced braces: extend to EOF rather than failing the file.
        if opened && !closed {
            end_line = lines.len() - 1;
        }

        units.push(Unit {
            kind,
            name,
            start_line: i,
            end_line,
            start_byte: offsets[i],
            end_byte: offsets[end_line + 1].min(content.len()),
            calls: Vec::new(),
            called_by: Vec::new(),
        });

        i = end_line + 1;
    }

    units
}

static PY_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^class\s+(\w+)").unwrap());
static PY_DEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:async\s+)?def\s+(\w+)").unwrap());
static RB_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:class|module)\s+(\w+)").unwrap());

static JS_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(\w+)").unwrap());
static JS_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(\w+)").unwrap()
});
static JS_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:export\s+)?const\s+(\w+)\s*=\s*(?:async\s+)?\(").unwrap());

static GO_FUNC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^func\s+(?:\([^)]*\)\s*)?(\w+)").unwrap());
static GO_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+(\w+)\s+(?:struct|interface)\b").unwrap());

static RS_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?(?:const\s+|unsafe\s+|async\s+)*fn\s+(\w+)").unwrap()
});
static RS_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|union)\s+(\w+)").unwrap()
});

static JAVA_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:public\s+|protected\s+|private\s+|static\s+|final\s+|abstract\s+)*(?:class|interface|enum)\s+(\w+)")
        .unwrap()
});
static CS_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:public\s+|internal\s+|protected\s+|private\s+|static\s+|sealed\s+|abstract\s+|partial\s+)*(?:class|interface|struct|enum)\s+(\w+)")
        .unwrap()
});

static PHP_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:abstract\s+|final\s+)*class\s+(\w+)").unwrap());
static PHP_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:public\s+|protected\s+|private\s+|static\s+)*function\s+(\w+)").unwrap()
});

static C_STRUCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:typedef\s+)?(?:class|struct)\s+(\w+)").unwrap());

static PY_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![
        (UnitKind::Class, &PY_CLASS),
        (UnitKind::Function, &PY_DEF),
    ]
});
static RB_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![
        (UnitKind::Class, &RB_CLASS),
        (UnitKind::Function, &PY_DEF),
    ]
});
static JS_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![
        (UnitKind::Class, &JS_CLASS),
        (UnitKind::Function, &JS_FUNCTION),
        (UnitKind::Function, &JS_ARROW),
    ]
});
static GO_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![(UnitKind::Class, &GO_TYPE), (UnitKind::Function, &GO_FUNC)]
});
static RS_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![(UnitKind::Class, &RS_TYPE), (UnitKind::Function, &RS_FN)]
});
static JAVA_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| vec![(UnitKind::Class, &JAVA_CLASS)]);
static CS_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| vec![(UnitKind::Class, &CS_CLASS)]);
static PHP_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| {
    vec![
        (UnitKind::Class, &PHP_CLASS),
        (UnitKind::Function, &PHP_FUNCTION),
    ]
});
static C_RULES: Lazy<Vec<DeclRule>> = Lazy::new(|| vec![(UnitKind::Class, &C_STRUCT)]);
static NO_RULES: Lazy<Vec<DeclRule>> = Lazy::new(Vec::new);

fn indent_rules(language: Language) -> &'static [DeclRule] {
    match language {
        Language::Python => &PY_RULES,
        Language::Ruby => &RB_RULES,
        _ => &NO_RULES,
    }
}

fn brace_rules(language: Language) -> &'static [DeclRule] {
    match language {
        Language::JavaScript | Language::TypeScript => &JS_RULES,
        Language::Go => &GO_RULES,
        Language::Rust => &RS_RULES,
        Language::Java => &JAVA_RULES,
        Language::CSharp => &CS_RULES,
        Language::Php => &PHP_RULES,
        Language::Cpp | Language::C | Language::Header => &C_RULES,
        _ => &NO_RULES,
    }
}
