//! Tool registry for managing available tools

use crate::directory::Directory;
use crate::tools::{Tool, ToolExecutor};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for managing tool creation and registration.
///
/// The registry owns the shared [`Directory`] so every adapter it creates
/// draws from the same injected randomness source.
pub struct ToolRegistry {
    directory: Arc<Directory>,
    factories: HashMap<String, Box<dyn ToolFactory>>,
}

/// Factory trait for creating tools
pub trait ToolFactory: Send + Sync {
    /// Create a new instance of the tool against the given directory
    fn create(&self, directory: Arc<Directory>) -> Box<dyn Tool>;

    /// Get the name of the tool this factory creates
    fn tool_name(&self) -> &str;

    /// Get the description of the tool this factory creates
    fn tool_description(&self) -> &str;
}

impl ToolRegistry {
    /// Create an empty registry over the given directory
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            directory,
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all directory tools and a fixed-seed directory
    pub fn with_seed(seed: u64) -> Self {
        let mut registry = Self::new(Arc::new(Directory::with_seed(seed)));
        registry.register_builtin_factories();
        registry
    }

    /// Register a tool factory
    pub fn register_factory(&mut self, factory: Box<dyn ToolFactory>) {
        self.factories
            .insert(factory.tool_name().to_string(), factory);
    }

    /// Create a tool by name
    pub fn create_tool(&self, name: &str) -> Option<Box<dyn Tool>> {
        self.factories
            .get(name)
            .map(|factory| factory.create(self.directory.clone()))
    }

    /// List all available tool names, sorted
    pub fn list_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get tool information
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.factories
            .get(name)
            .map(|factory| (factory.tool_name(), factory.tool_description()))
    }

    /// Create a tool executor with the specified tools
    pub fn create_executor(&self, tool_names: &[String]) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for name in tool_names {
            if let Some(tool) = self.create_tool(name) {
                executor.register_tool(tool);
            } else {
                tracing::warn!("Unknown tool requested: {}", name);
            }
        }

        executor
    }

    /// Create a tool executor with all available tools
    pub fn create_executor_with_all(&self) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for factory in self.factories.values() {
            executor.register_tool(factory.create(self.directory.clone()));
        }

        executor
    }

    fn register_builtin_factories(&mut self) {
        self.register_factory(Box::new(crate::tools::builtin::SupervisorToolFactory));
        self.register_factory(Box::new(crate::tools::builtin::LocationToolFactory));
        self.register_factory(Box::new(crate::tools::builtin::EmployeeIdToolFactory));
        self.register_factory(Box::new(crate::tools::builtin::SkillSetToolFactory));
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::new(Arc::new(Directory::new()));
        registry.register_builtin_factories();
        registry
    }
}

/// Macro to help implement tool factories
#[macro_export]
macro_rules! impl_tool_factory {
    ($factory:ident, $tool:ident, $name:expr, $description:expr) => {
        pub struct $factory;

        impl $crate::tools::ToolFactory for $factory {
            fn create(
                &self,
                directory: std::sync::Arc<$crate::directory::Directory>,
            ) -> Box<dyn $crate::tools::Tool> {
                Box::new($tool::new(directory))
            }

            fn tool_name(&self) -> &str {
                $name
            }

            fn tool_description(&self) -> &str {
                $description
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::tools::registry::ToolRegistry;

    const EXPECTED_TOOLS: [&str; 4] = [
        "get_employee_id",
        "get_employee_location",
        "get_employee_skill_set",
        "get_employee_supervisor",
    ];

    #[test]
    fn default_registry_has_all_directory_tools() {
        let registry = ToolRegistry::default();
        let tools = registry.list_tools();

        assert_eq!(tools, EXPECTED_TOOLS);
    }

    #[test]
    fn tool_creation() {
        let registry = ToolRegistry::default();

        for tool_name in EXPECTED_TOOLS {
            let tool = registry
                .create_tool(tool_name)
                .unwrap_or_else(|| panic!("Failed to create tool '{}'", tool_name));

            assert_eq!(tool.name(), tool_name);
            assert!(
                !tool.description().is_empty(),
                "Tool '{}' has empty description",
                tool_name
            );
        }

        assert!(registry.create_tool("get_employee_salary").is_none());
    }

    #[test]
    fn tool_info() {
        let registry = ToolRegistry::default();

        for tool_name in registry.list_tools() {
            let (name, description) = registry
                .get_tool_info(tool_name)
                .unwrap_or_else(|| panic!("Failed to get info for tool '{}'", tool_name));

            assert_eq!(name, tool_name);
            assert!(!description.is_empty());
        }
    }

    #[test]
    fn executor_creation_skips_unknown_names() {
        let registry = ToolRegistry::default();

        let tool_names = vec![
            "get_employee_supervisor".to_string(),
            "get_employee_salary".to_string(),
        ];
        let executor = registry.create_executor(&tool_names);
        assert_eq!(executor.list_tools(), vec!["get_employee_supervisor"]);

        let all_executor = registry.create_executor_with_all();
        assert_eq!(all_executor.list_tools(), EXPECTED_TOOLS);
    }

    #[test]
    fn tool_examples() {
        let registry = ToolRegistry::default();

        for tool_name in registry.list_tools() {
            let tool = registry.create_tool(tool_name).unwrap();
            let examples = tool.examples();

            assert!(!examples.is_empty(), "Tool '{}' has no examples", tool_name);

            for example in &examples {
                assert!(!example.description.is_empty());
                assert!(example.parameters.is_object());
                assert!(!example.expected_result.is_empty());
            }
        }
    }

    #[test]
    fn tool_parameter_schemas_declare_one_required_string() {
        let registry = ToolRegistry::default();

        for tool_name in registry.list_tools() {
            let tool = registry.create_tool(tool_name).unwrap();
            let schema = tool.parameters_schema();

            assert_eq!(schema["type"], "object", "tool: {}", tool_name);

            let properties = schema["properties"]
                .as_object()
                .unwrap_or_else(|| panic!("Tool '{}' schema has no properties", tool_name));
            assert_eq!(properties.len(), 1, "tool: {}", tool_name);

            let (field, prop) = properties.iter().next().unwrap();
            assert_eq!(prop["type"], "string", "tool: {}", tool_name);
            assert!(
                !prop["description"].as_str().unwrap_or("").is_empty(),
                "tool: {}",
                tool_name
            );

            let required = schema["required"]
                .as_array()
                .unwrap_or_else(|| panic!("Tool '{}' schema has no required list", tool_name));
            assert_eq!(required.len(), 1, "tool: {}", tool_name);
            assert_eq!(required[0], field.as_str(), "tool: {}", tool_name);
        }
    }
}
