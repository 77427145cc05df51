// Keyword heuristics mapping an agent's free-text thought to suggested tools.
// Rules are evaluated in table order against the lowercased thought and are
// independent: a thought may fire none, one, or many of them. Output keeps
// evaluation order, and a rule whose tool is unavailable is skipped.

use crate::catalog::ToolCatalog;
use crate::types::Recommendation;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Lookup of which tools the host currently offers
pub trait Availability {
    fn contains_tool(&self, name: &str) -> bool;
}

impl<V> Availability for HashMap<String, V> {
    fn contains_tool(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V> Availability for BTreeMap<String, V> {
    fn contains_tool(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl Availability for HashSet<String> {
    fn contains_tool(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl Availability for ToolCatalog {
    fn contains_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<T: Availability + ?Sized> Availability for &T {
    fn contains_tool(&self, name: &str) -> bool {
        (**self).contains_tool(name)
    }
}

/// Substring predicate over a lowercased thought
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Any of the keywords appears
    Any(&'static [&'static str]),
    /// Every inner matcher holds
    All(&'static [Matcher]),
    /// At least one inner matcher holds
    Either(&'static [Matcher]),
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Any(keywords) => keywords.iter().any(|k| text.contains(k)),
            Matcher::All(inner) => inner.iter().all(|m| m.matches(text)),
            Matcher::Either(inner) => inner.iter().any(|m| m.matches(text)),
        }
    }
}

/// How a fired rule assigns its priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Position in the output so far, plus one
    Sequential,
    /// Pinned value regardless of position
    Fixed(u32),
}

/// One entry of the ordered rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub tool: &'static str,
    pub matcher: Matcher,
    pub confidence: f64,
    pub rationale: &'static str,
    pub priority: Priority,
    pub alternatives: &'static [&'static str],
}

impl Rule {
    fn recommendation(&self, emitted: usize) -> Recommendation {
        let priority = match self.priority {
            Priority::Fixed(p) => p,
            Priority::Sequential => emitted as u32 + 1,
        };
        let alternatives = if self.alternatives.is_empty() {
            None
        } else {
            Some(self.alternatives.iter().map(|a| a.to_string()).collect())
        };

        Recommendation {
            tool_name: self.tool.to_string(),
            confidence: self.confidence,
            rationale: self.rationale.to_string(),
            priority,
            alternatives,
        }
    }
}

const EDIT_WORDS: Matcher = Matcher::Any(&["edit", "change", "modification"]);

static BUILTIN_RULES: &[Rule] = &[
    Rule {
        tool: "StickerRequest",
        matcher: Matcher::Any(&["sticker", "merchandise", "swag", "claude merch"]),
        confidence: 0.95,
        rationale: "User mentioned stickers or Claude merchandise",
        priority: Priority::Fixed(1),
        alternatives: &[],
    },
    Rule {
        tool: "Read",
        matcher: Matcher::Any(&["read", "examine", "look at", "check", "view", "inspect"]),
        confidence: 0.9,
        rationale: "Need to examine file contents",
        priority: Priority::Sequential,
        alternatives: &["Grep", "Agent"],
    },
    Rule {
        tool: "Write",
        matcher: Matcher::Any(&["create", "write", "new file", "generate"]),
        confidence: 0.85,
        rationale: "Need to create or write a file",
        priority: Priority::Sequential,
        alternatives: &["Edit"],
    },
    Rule {
        tool: "Edit",
        matcher: Matcher::Any(&["edit", "modify", "change", "update", "fix", "replace"]),
        confidence: 0.9,
        rationale: "Need to modify existing file content",
        priority: Priority::Sequential,
        alternatives: &["MultiEdit", "Write"],
    },
    Rule {
        tool: "MultiEdit",
        matcher: Matcher::All(&[Matcher::Any(&["multiple"]), EDIT_WORDS]),
        confidence: 0.95,
        rationale: "Need to make multiple edits to the same file",
        priority: Priority::Fixed(1),
        alternatives: &["Edit"],
    },
    Rule {
        tool: "Grep",
        matcher: Matcher::Any(&["search", "find", "locate", "grep"]),
        confidence: 0.85,
        rationale: "Need to search for content within files",
        priority: Priority::Sequential,
        alternatives: &["Glob", "Agent"],
    },
    Rule {
        tool: "LS",
        matcher: Matcher::Any(&["list", "directory", "folder", "ls"]),
        confidence: 0.9,
        rationale: "Need to explore directory contents",
        priority: Priority::Sequential,
        alternatives: &["Glob"],
    },
    Rule {
        tool: "Bash",
        matcher: Matcher::Any(&["run", "execute", "command", "bash", "shell", "terminal"]),
        confidence: 0.85,
        rationale: "Need to execute shell commands",
        priority: Priority::Sequential,
        alternatives: &[],
    },
    Rule {
        tool: "TodoWrite",
        matcher: Matcher::Any(&["todo", "task", "plan", "track"]),
        confidence: 0.8,
        rationale: "Need to manage or track tasks",
        priority: Priority::Sequential,
        alternatives: &["TodoRead"],
    },
    Rule {
        tool: "WebFetch",
        matcher: Matcher::Any(&["web", "url", "website", "online"]),
        confidence: 0.8,
        rationale: "Need to access web content",
        priority: Priority::Sequential,
        alternatives: &["WebSearch"],
    },
    Rule {
        tool: "Agent",
        matcher: Matcher::Any(&["complex", "multiple steps", "autonomous", "investigate"]),
        confidence: 0.75,
        rationale: "Complex task that may benefit from autonomous execution",
        priority: Priority::Sequential,
        alternatives: &[],
    },
    Rule {
        tool: "mcp__basic-memory__write_note",
        matcher: Matcher::Any(&["record", "save", "document", "write note", "capture", "remember"]),
        confidence: 0.95,
        rationale: "Need to record or save information to memory",
        priority: Priority::Fixed(1),
        alternatives: &["Write"],
    },
    Rule {
        tool: "mcp__basic-memory__read_note",
        matcher: Matcher::Any(&["memory://", "read note", "check memory", "recall"]),
        confidence: 0.9,
        rationale: "Need to read from memory or knowledge base",
        priority: Priority::Sequential,
        alternatives: &["mcp__basic-memory__search_notes"],
    },
    Rule {
        tool: "mcp__basic-memory__search_notes",
        matcher: Matcher::Either(&[
            Matcher::All(&[
                Matcher::Any(&["search"]),
                Matcher::Any(&["memory", "knowledge", "notes"]),
            ]),
            Matcher::Any(&["find in memory"]),
        ]),
        confidence: 0.9,
        rationale: "Need to search the knowledge base",
        priority: Priority::Sequential,
        alternatives: &["mcp__basic-memory__recent_activity"],
    },
    Rule {
        tool: "mcp__basic-memory__build_context",
        matcher: Matcher::Any(&["context", "related", "connections", "knowledge graph"]),
        confidence: 0.85,
        rationale: "Need to build context from knowledge graph",
        priority: Priority::Sequential,
        alternatives: &[],
    },
    Rule {
        tool: "mcp__basic-memory__recent_activity",
        matcher: Matcher::Any(&["recent", "latest", "what changed", "activity"]),
        confidence: 0.85,
        rationale: "Need to check recent activity or changes",
        priority: Priority::Sequential,
        alternatives: &[],
    },
    Rule {
        tool: "mcp__basic-memory__canvas",
        matcher: Matcher::Any(&["visualize", "diagram", "canvas", "graph visualization"]),
        confidence: 0.9,
        rationale: "Need to create visual representation of knowledge",
        priority: Priority::Sequential,
        alternatives: &[],
    },
];

/// The built-in rule table, in evaluation order
pub fn rules() -> &'static [Rule] {
    BUILTIN_RULES
}

/// Evaluates an ordered rule table against thoughts
#[derive(Debug, Clone, Copy)]
pub struct Recommender {
    rules: &'static [Rule],
}

impl Recommender {
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Suggest tools for `thought`, restricted to what `available` offers
    pub fn recommend<A>(&self, thought: &str, available: &A) -> Vec<Recommendation>
    where
        A: Availability + ?Sized,
    {
        let thought = thought.to_lowercase();
        let mut recommendations = Vec::new();

        for rule in self.rules {
            if !rule.matcher.matches(&thought) {
                continue;
            }
            if !available.contains_tool(rule.tool) {
                tracing::trace!(tool = rule.tool, "rule matched but tool is not available");
                continue;
            }

            let rec = rule.recommendation(recommendations.len());
            tracing::trace!(tool = rule.tool, priority = rec.priority, "rule fired");
            recommendations.push(rec);
        }

        recommendations
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_rules(BUILTIN_RULES)
    }
}

/// Suggest tools for `thought` using the built-in rules
pub fn recommend<A>(thought: &str, available: &A) -> Vec<Recommendation>
where
    A: Availability + ?Sized,
{
    Recommender::default().recommend(thought, available)
}
