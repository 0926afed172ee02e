/// Everything needed to describe one surviving mutant.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub mutator_name: &'a str,
    pub original_code: &'a str,
    pub replacement_code: &'a str,
    pub file_name: &'a str,
    pub line: usize,
    pub test_info: Option<&'a str>,
    pub test_file_name: Option<&'a str>,
}

/// Build the remediation prompt attached to a surviving mutant's diagnostic.
pub fn compose(input: &PromptInput) -> String {
    format!(
        "Stryker found that the \"{mutator}\" mutation survived in \"{file}\", at line {line}.\n\
         \n\
         **Original code:**\n\
         {original}\n\
         \n\
         **Code mutated by Stryker:**\n\
         {replacement}\n\
         \n\
         {guidance}",
        mutator = input.mutator_name,
        file = input.file_name,
        line = input.line,
        original = input.original_code.trim(),
        replacement = input.replacement_code.trim(),
        guidance = test_guidance(input.test_info, input.test_file_name),
    )
    .trim()
    .to_string()
}

fn test_guidance(test_info: Option<&str>, test_file_name: Option<&str>) -> String {
    match (test_info, test_file_name) {
        (Some(info), file) => format!(
            "Analyze the unit test:\n{info}\nfound in:\n{}\nand explain how to extend it, \
             or add new unit tests, so that this mutant is killed.",
            file.unwrap_or("<unknown test file>"),
        ),
        (None, Some(file)) => format!(
            "No test covering this mutation exists yet in:\n{file}\n\
             Write a new unit test in that file that kills this mutant."
        ),
        (None, None) => "No test file covering this mutation exists yet. \
             Write new unit tests from scratch that kill this mutant."
            .to_string(),
    }
}
