//! Loader for operations files.
//!
//! Parses `.sg` files with step markers (`--# step_name`). The first line
//! of a step is its pattern; any further lines form its edit script.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// Pattern and edit script of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSource {
    pub pattern: String,
    /// Edit-script text; empty for a match-only step.
    pub script: String,
}

impl StepSource {
    fn split(body: &str) -> Self {
        let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());
        let pattern = lines.next().unwrap_or_default().to_string();
        let script: Vec<&str> = lines.collect();
        Self {
            pattern,
            script: script.join("\n"),
        }
    }

    pub fn is_surgery(&self) -> bool {
        !self.script.is_empty()
    }
}

/// A parsed operations file.
#[derive(Debug, Clone)]
pub struct Operations {
    /// The raw file content.
    pub source: String,
    /// Map of step name to step body.
    pub steps: HashMap<String, String>,
    /// Steps in order of appearance.
    pub step_order: Vec<String>,
    /// Parameters per step (step name -> (param name -> value))
    pub step_params: HashMap<String, HashMap<String, String>>,
}

impl Operations {
    /// Parse an operations file from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        let mut steps = HashMap::new();
        let mut step_order = Vec::new();
        let mut step_params: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_step: Option<String> = None;
        let mut current_content = String::new();
        let mut current_params: HashMap<String, String> = HashMap::new();

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some(step_name) = current_step.take() {
                    finish_step(
                        &mut steps,
                        &mut step_params,
                        step_name,
                        &current_content,
                        std::mem::take(&mut current_params),
                    );
                }

                let step_name = suffix.trim().to_string();
                if step_name.is_empty() {
                    return Err(ScenarioError::operations_parse(
                        "<inline>",
                        "empty step name after --#",
                    ));
                }
                if step_order.contains(&step_name) {
                    return Err(ScenarioError::operations_parse(
                        "<inline>",
                        format!("duplicate step '{}'", step_name),
                    ));
                }
                step_order.push(step_name.clone());
                current_step = Some(step_name);
                current_content.clear();
            } else if current_step.is_some() {
                // -- @param $name = value
                if let Some(param_str) = trimmed.strip_prefix("-- @param ") {
                    if let Some((name, value)) = parse_param_def(param_str) {
                        current_params.insert(name, value);
                    }
                } else if !trimmed.starts_with("--") {
                    current_content.push_str(line);
                    current_content.push('\n');
                }
            }
            // Lines before the first step marker are file-level comments.
        }

        if let Some(step_name) = current_step {
            finish_step(&mut steps, &mut step_params, step_name, &current_content, current_params);
        }

        Ok(Self {
            source: source.to_string(),
            steps,
            step_order,
            step_params,
        })
    }

    /// Load and parse an operations file from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse(&source).map_err(|e| ScenarioError::operations_parse(path, e.to_string()))
    }

    /// Get a step with parameters substituted.
    pub fn get_step(&self, name: &str) -> Option<StepSource> {
        self.steps.get(name).map(|body| {
            let mut body = body.clone();
            if let Some(params) = self.step_params.get(name) {
                for (param_name, param_value) in params {
                    body = body.replace(&format!("${}", param_name), param_value);
                }
            }
            StepSource::split(&body)
        })
    }

    /// Get the raw body of a step (without parameter substitution).
    pub fn get_step_raw(&self, name: &str) -> Option<&str> {
        self.steps.get(name).map(|s| s.as_str())
    }

    /// Get all step names in order.
    pub fn step_names(&self) -> &[String] {
        &self.step_order
    }
}

fn finish_step(
    steps: &mut HashMap<String, String>,
    step_params: &mut HashMap<String, HashMap<String, String>>,
    name: String,
    content: &str,
    params: HashMap<String, String>,
) {
    let content = content.trim();
    if !content.is_empty() {
        steps.insert(name.clone(), content.to_string());
    }
    if !params.is_empty() {
        step_params.insert(name, params);
    }
}

/// Parse `$name = value`, returning the name without `$`.
fn parse_param_def(s: &str) -> Option<(String, String)> {
    let (name, value) = s.split_once('=')?;
    let name = name.trim().trim_start_matches('$').to_string();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let source = r#"
-- File comment (ignored)

--# find
{tag:/VB.*/}=v >nsubj {}=s

--# rewrite
{}=v >dobj=e {}=o
relabelEdge -edge e -reln obj
"#;
        let ops = Operations::parse(source).unwrap();

        assert_eq!(ops.step_names(), &["find", "rewrite"]);
        let find = ops.get_step("find").unwrap();
        assert_eq!(find.pattern, "{tag:/VB.*/}=v >nsubj {}=s");
        assert!(!find.is_surgery());

        let rewrite = ops.get_step("rewrite").unwrap();
        assert_eq!(rewrite.pattern, "{}=v >dobj=e {}=o");
        assert_eq!(rewrite.script, "relabelEdge -edge e -reln obj");
    }

    #[test]
    fn test_param_substitution() {
        let source = r#"
--# by_lemma
-- @param $lemma = dog
{lemma:$lemma}=n
"#;
        let ops = Operations::parse(source).unwrap();

        assert_eq!(ops.get_step("by_lemma").unwrap().pattern, "{lemma:dog}=n");
        assert_eq!(ops.get_step_raw("by_lemma"), Some("{lemma:$lemma}=n"));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_names() {
        assert!(Operations::parse("--#\n{}").is_err());
        assert!(Operations::parse("--# a\n{}\n--# a\n{}").is_err());
    }
}
