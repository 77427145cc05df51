// Built-in catalog of tool descriptors a host agent runtime may offer

use crate::error::{CatalogError, CatalogResult};
use crate::schema::{
    json_schema_array, json_schema_empty_object, json_schema_number, json_schema_object,
    json_schema_string, json_schema_string_enum, json_schema_type, with_default,
    with_min_length,
};
use crate::types::ToolDescriptor;
use serde_json::json;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Ordered, read-only list of tool descriptors
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Build a catalog from descriptors, keeping their order
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    /// The built-in catalog, constructed on first use and shared afterwards
    pub fn builtin() -> &'static ToolCatalog {
        static CATALOG: OnceLock<ToolCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| ToolCatalog::new(builtin_tools()))
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get a descriptor by name
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Get a descriptor by name, failing if it is not in the catalog
    pub fn require(&self, name: &str) -> CatalogResult<&ToolDescriptor> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownTool(name.to_string()))
    }

    /// The whole catalog as a name -> descriptor availability map
    pub fn availability(&self) -> HashMap<String, ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| (t.name.clone(), t.clone()))
            .collect()
    }

    /// Availability map restricted to `names`; every name must exist
    pub fn select<I, S>(&self, names: I) -> CatalogResult<HashMap<String, ToolDescriptor>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = HashMap::new();
        for name in names {
            let descriptor = self.require(name.as_ref())?;
            selected.insert(descriptor.name.clone(), descriptor.clone());
        }
        Ok(selected)
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn page_schema() -> serde_json::Value {
    with_default(json_schema_number("Page number"), 1)
}

fn page_size_schema() -> serde_json::Value {
    with_default(json_schema_number("Results per page"), 10)
}

fn expected_replacements_schema() -> serde_json::Value {
    with_default(json_schema_number("Expected number of replacements"), 1)
}

fn string_list_schema(description: &str) -> serde_json::Value {
    json_schema_array(json_schema_type("string"), description)
}

/// Descriptors for every built-in tool, in advertised order
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    let mut tools = Vec::with_capacity(25);
    tools.extend(file_tools());
    tools.extend(execution_tools());
    tools.extend(notebook_tools());
    tools.extend(web_tools());
    tools.extend(task_tools());
    tools.push(ToolDescriptor::new(
        "StickerRequest",
        "Request Anthropic/Claude stickers. Use this when users mention wanting stickers or Claude merchandise.",
        json_schema_object(
            json!({ "reason": json_schema_string("Why the user wants stickers") }),
            vec!["reason"],
        ),
    ));
    tools.extend(memory_tools());
    tools
}

fn file_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "Read",
            "Reads a file from the local filesystem. Supports reading specific line ranges.",
            json_schema_object(
                json!({
                    "file_path": json_schema_string("The absolute path to the file to read"),
                    "offset": json_schema_number("The line number to start reading from"),
                    "limit": json_schema_number("The number of lines to read")
                }),
                vec!["file_path"],
            ),
        ),
        ToolDescriptor::new(
            "Write",
            "Writes a file to the local filesystem. Will overwrite existing files.",
            json_schema_object(
                json!({
                    "file_path": json_schema_string("The absolute path to the file to write"),
                    "content": json_schema_string("The content to write to the file")
                }),
                vec!["file_path", "content"],
            ),
        ),
        ToolDescriptor::new(
            "Edit",
            "Performs exact string replacements in files with occurrence count validation.",
            json_schema_object(
                json!({
                    "file_path": json_schema_string("The absolute path to the file to modify"),
                    "old_string": json_schema_string("The text to replace"),
                    "new_string": json_schema_string("The text to replace it with"),
                    "expected_replacements": expected_replacements_schema()
                }),
                vec!["file_path", "old_string", "new_string"],
            ),
        ),
        ToolDescriptor::new(
            "MultiEdit",
            "Make multiple edits to a single file in one operation.",
            json_schema_object(
                json!({
                    "file_path": json_schema_string("The absolute path to the file to modify"),
                    "edits": json_schema_array(
                        json_schema_object(
                            json!({
                                "old_string": json_schema_string("The text to replace"),
                                "new_string": json_schema_string("The text to replace it with"),
                                "expected_replacements": expected_replacements_schema()
                            }),
                            vec!["old_string", "new_string"],
                        ),
                        "Array of edit operations to perform sequentially",
                    )
                }),
                vec!["file_path", "edits"],
            ),
        ),
        ToolDescriptor::new(
            "LS",
            "Lists files and directories in a given path.",
            json_schema_object(
                json!({
                    "path": json_schema_string("The absolute path to the directory to list"),
                    "ignore": string_list_schema("List of glob patterns to ignore")
                }),
                vec!["path"],
            ),
        ),
        ToolDescriptor::new(
            "Glob",
            "Fast file pattern matching tool that works with any codebase size.",
            json_schema_object(
                json!({
                    "pattern": json_schema_string("The glob pattern to match files against"),
                    "path": json_schema_string("The directory to search in")
                }),
                vec!["pattern"],
            ),
        ),
        ToolDescriptor::new(
            "Grep",
            "Fast content search tool that searches file contents using regular expressions.",
            json_schema_object(
                json!({
                    "pattern": json_schema_string("The regular expression pattern to search for"),
                    "path": json_schema_string("The directory to search in"),
                    "include": json_schema_string("File pattern to include in the search")
                }),
                vec!["pattern"],
            ),
        ),
    ]
}

fn execution_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "Bash",
            "Executes a given bash command in a persistent shell session.",
            json_schema_object(
                json!({
                    "command": json_schema_string("The command to execute"),
                    "description": json_schema_string("Clear, concise description of what this command does"),
                    "timeout": json_schema_number("Optional timeout in milliseconds (max 600000)")
                }),
                vec!["command"],
            ),
        ),
        ToolDescriptor::new(
            "Agent",
            "Launch a new agent that has access to all tools for autonomous task completion.",
            json_schema_object(
                json!({
                    "description": json_schema_string("A short (3-5 word) description of the task"),
                    "prompt": json_schema_string("The task for the agent to perform")
                }),
                vec!["description", "prompt"],
            ),
        ),
    ]
}

fn notebook_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "NotebookRead",
            "Reads a Jupyter notebook (.ipynb file) and returns all cells with their outputs.",
            json_schema_object(
                json!({
                    "notebook_path": json_schema_string("The absolute path to the Jupyter notebook file")
                }),
                vec!["notebook_path"],
            ),
        ),
        ToolDescriptor::new(
            "NotebookEdit",
            "Completely replaces the contents of a specific cell in a Jupyter notebook.",
            json_schema_object(
                json!({
                    "notebook_path": json_schema_string("The absolute path to the Jupyter notebook file"),
                    "cell_number": json_schema_number("The index of the cell to edit (0-based)"),
                    "new_source": json_schema_string("The new source for the cell"),
                    "cell_type": json_schema_string_enum(&["code", "markdown"], "The type of the cell"),
                    "edit_mode": json_schema_string_enum(
                        &["replace", "insert", "delete"],
                        "The type of edit to make",
                    )
                }),
                vec!["notebook_path", "cell_number", "new_source"],
            ),
        ),
    ]
}

fn web_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "WebFetch",
            "Fetches content from a specified URL and processes it using an AI model.",
            json_schema_object(
                json!({
                    "url": json_schema_string("The URL to fetch content from"),
                    "prompt": json_schema_string("The prompt to run on the fetched content")
                }),
                vec!["url", "prompt"],
            ),
        ),
        ToolDescriptor::new(
            "WebSearch",
            "Allows Claude to search the web and use the results to inform responses.",
            json_schema_object(
                json!({
                    "query": with_min_length(json_schema_string("The search query to use"), 2),
                    "allowed_domains": string_list_schema("Only include results from these domains"),
                    "blocked_domains": string_list_schema("Never include results from these domains")
                }),
                vec!["query"],
            ),
        ),
    ]
}

fn task_tools() -> Vec<ToolDescriptor> {
    let todo_item = json_schema_object(
        json!({
            "id": json_schema_type("string"),
            "content": with_min_length(json_schema_type("string"), 1),
            "status": {
                "type": "string",
                "enum": ["pending", "in_progress", "completed"]
            },
            "priority": {
                "type": "string",
                "enum": ["high", "medium", "low"]
            }
        }),
        vec!["content", "status", "priority", "id"],
    );

    vec![
        ToolDescriptor::new(
            "TodoRead",
            "Use this tool to read the current to-do list for the session.",
            json_schema_empty_object(json!({}), true),
        ),
        ToolDescriptor::new(
            "TodoWrite",
            "Use this tool to create and manage a structured task list for the current coding session.",
            json_schema_object(
                json!({ "todos": json_schema_array(todo_item, "The updated todo list") }),
                vec!["todos"],
            ),
        ),
    ]
}

fn memory_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "mcp__basic-memory__write_note",
            "Create or update a markdown note. Returns a markdown formatted summary of the semantic content. THE MOST IMPORTANT TOOL for recording context!",
            json_schema_object(
                json!({
                    "title": json_schema_string("Title of the note"),
                    "content": json_schema_string("Content in markdown format"),
                    "folder": json_schema_string("Folder to save in"),
                    "tags": json_schema_string("Tags for categorization")
                }),
                vec!["title", "content", "folder"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__read_note",
            "Read a markdown note by title or permalink.",
            json_schema_object(
                json!({
                    "identifier": json_schema_string("Note title, path, or memory:// URL"),
                    "page": page_schema(),
                    "page_size": page_size_schema()
                }),
                vec!["identifier"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__search_notes",
            "Search across all content in the knowledge base.",
            json_schema_object(
                json!({
                    "query": json_schema_string("Text to search for"),
                    "page": page_schema(),
                    "page_size": page_size_schema(),
                    "search_type": with_default(json_schema_string("Type of search"), "text"),
                    "types": string_list_schema("Filter by types"),
                    "entity_types": string_list_schema("Filter by entity types"),
                    "after_date": json_schema_string("Filter by date")
                }),
                vec!["query"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__build_context",
            "Build context from a memory:// URI to continue conversations naturally. Use this to follow up on previous discussions or explore related topics.",
            json_schema_object(
                json!({
                    "url": json_schema_string("memory:// URL starting point"),
                    "depth": with_default(json_schema_number("How many hops to follow"), 1),
                    "timeframe": with_default(
                        json_schema_string("Natural language timeframe like \"2 days ago\", \"last week\""),
                        "7d",
                    ),
                    "max_related": with_default(json_schema_number("Max related items"), 10),
                    "page": page_schema(),
                    "page_size": page_size_schema()
                }),
                vec!["url"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__recent_activity",
            "Get recent activity from across the knowledge base. Timeframe supports natural language formats.",
            json_schema_empty_object(
                json!({
                    "timeframe": with_default(
                        json_schema_string("Natural language like \"2 days ago\", \"last week\""),
                        "7d",
                    ),
                    "type": with_default(json_schema_string("Filter by type"), ""),
                    "depth": with_default(json_schema_number("Related items depth"), 1),
                    "max_related": with_default(json_schema_number("Max related items"), 10),
                    "page": page_schema(),
                    "page_size": page_size_schema()
                }),
                false,
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__canvas",
            "Create an Obsidian canvas file to visualize concepts and connections.",
            json_schema_object(
                json!({
                    "nodes": json_schema_array(json_schema_type("object"), "Nodes to display"),
                    "edges": json_schema_array(json_schema_type("object"), "Connections between nodes"),
                    "title": json_schema_string("Canvas title"),
                    "folder": json_schema_string("Storage location")
                }),
                vec!["nodes", "edges", "title", "folder"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__delete_note",
            "Delete a note by title or permalink",
            json_schema_object(
                json!({
                    "identifier": json_schema_string("Note title or permalink to delete")
                }),
                vec!["identifier"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__read_content",
            "Read a file's raw content by path or permalink",
            json_schema_object(
                json!({ "path": json_schema_string("File path or permalink") }),
                vec!["path"],
            ),
        ),
        ToolDescriptor::new(
            "mcp__basic-memory__project_info",
            "Get information and statistics about the current Basic Memory project.",
            json_schema_empty_object(json!({}), false),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = ToolCatalog::builtin();
        let names: Vec<&str> = catalog.names().collect();

        assert_eq!(catalog.len(), 25);
        assert_eq!(&names[..4], &["Read", "Write", "Edit", "MultiEdit"]);
        assert_eq!(names[15], "StickerRequest");
        assert_eq!(names[24], "mcp__basic-memory__project_info");
    }

    #[test]
    fn test_names_are_unique() {
        let catalog = ToolCatalog::builtin();
        let unique: HashSet<&str> = catalog.names().collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn test_every_required_field_is_a_property() {
        for tool in ToolCatalog::builtin().tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            for field in tool.required_fields() {
                assert!(tool.has_property(field), "{} requires undeclared {}", tool.name, field);
            }
        }
    }

    #[test]
    fn test_schema_details() {
        let catalog = ToolCatalog::builtin();

        let edit = catalog.get("Edit").unwrap();
        assert_eq!(
            edit.input_schema["properties"]["expected_replacements"]["default"],
            1
        );

        let multi = catalog.get("MultiEdit").unwrap();
        let items = &multi.input_schema["properties"]["edits"]["items"];
        assert_eq!(items["required"], json!(["old_string", "new_string"]));

        let notebook = catalog.get("NotebookEdit").unwrap();
        assert_eq!(
            notebook.input_schema["properties"]["edit_mode"]["enum"],
            json!(["replace", "insert", "delete"])
        );

        let search = catalog.get("WebSearch").unwrap();
        assert_eq!(search.input_schema["properties"]["query"]["minLength"], 2);

        let todo_read = catalog.get("TodoRead").unwrap();
        assert_eq!(todo_read.input_schema["additionalProperties"], false);
        assert!(todo_read.input_schema.get("required").is_none());

        let recent = catalog.get("mcp__basic-memory__recent_activity").unwrap();
        assert!(recent.required_fields().is_empty());
        assert_eq!(recent.input_schema["properties"]["type"]["default"], "");
    }

    #[test]
    fn test_require_and_select() {
        let catalog = ToolCatalog::builtin();

        assert!(catalog.require("Grep").is_ok());
        assert_eq!(
            catalog.require("Teleport").unwrap_err(),
            CatalogError::UnknownTool("Teleport".to_string())
        );

        let subset = catalog.select(["Read", "Grep"]).unwrap();
        assert_eq!(subset.len(), 2);
        assert!(subset.contains_key("Read"));

        assert!(catalog.select(["Read", "Teleport"]).is_err());
    }

    #[test]
    fn test_availability_covers_catalog() {
        let catalog = ToolCatalog::builtin();
        let available = catalog.availability();
        assert_eq!(available.len(), catalog.len());
        assert_eq!(available["LS"], *catalog.get("LS").unwrap());
    }
}
