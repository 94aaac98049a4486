//! ASCII tree rendering for a sheet.

use crate::models::{Difficulty, Progress, Question, Sheet, SubTopic, Topic};

const DONE: char = '●';
const OPEN: char = '○';

/// Get the status symbol for a question.
fn completion_symbol(question: &Question) -> char {
    if question.completed {
        DONE
    } else {
        OPEN
    }
}

fn difficulty_tag(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "E",
        Difficulty::Medium => "M",
        Difficulty::Hard => "H",
    }
}

fn progress_label(progress: Progress) -> String {
    format!(
        "{}/{} {}%",
        progress.completed,
        progress.total,
        progress.percent()
    )
}

/// Render a sheet as ASCII art with progress counters and completion symbols.
///
/// Example output:
/// ```text
/// Arrays [1/3 33%]
/// ├── Basics [1/2 50%]
/// │   ├── ● [E] Two Sum
/// │   └── ○ [E] Best Time to Buy and Sell Stock
/// └── Prefix Sum [0/1 0%]
///     └── ○ [M] Subarray Sum Equals K
/// ```
///
/// With `show_ids`, every line is suffixed with the entity id so it can be
/// passed back to editing commands.
pub fn render_sheet(sheet: &Sheet, show_ids: bool) -> String {
    let mut output = String::new();
    for topic in &sheet.topics {
        render_topic(&mut output, topic, show_ids);
    }
    output
}

fn push_id(output: &mut String, id: &str, show_ids: bool) {
    if show_ids {
        output.push_str(" (");
        output.push_str(id);
        output.push(')');
    }
    output.push('\n');
}

fn render_topic(output: &mut String, topic: &Topic, show_ids: bool) {
    output.push_str(&topic.title);
    output.push_str(&format!(" [{}]", progress_label(topic.progress())));
    push_id(output, &topic.id, show_ids);

    for (i, sub) in topic.sub_topics.iter().enumerate() {
        let is_last = i == topic.sub_topics.len() - 1;
        render_sub_topic(output, sub, is_last, show_ids);
    }
}

fn render_sub_topic(output: &mut String, sub: &SubTopic, is_last: bool, show_ids: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push_str(&sub.title);
    output.push_str(&format!(" [{}]", progress_label(sub.progress())));
    push_id(output, &sub.id, show_ids);

    let prefix = if is_last { "    " } else { "│   " };
    for (i, question) in sub.questions.iter().enumerate() {
        let branch = if i == sub.questions.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(prefix);
        output.push_str(branch);
        output.push(completion_symbol(question));
        output.push_str(&format!(" [{}] ", difficulty_tag(question.difficulty)));
        output.push_str(&question.title);
        push_id(output, &question.id, show_ids);
    }
}
