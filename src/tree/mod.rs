//! Pure transformations of a [`Sheet`].
//!
//! Every function takes the current sheet by reference and returns a new one;
//! nothing is mutated in place. The tree is rebuilt top-down by mapping over
//! each level, so an id that does not exist at any level simply leaves that
//! branch as-is and the result equals the input.

use uuid::Uuid;

use crate::models::*;

/// Generate an opaque identifier for a new entity.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Move the element at `from` to `to`, shifting the elements in between by one.
///
/// All other elements keep their relative order. Out-of-range indices leave
/// the sequence unchanged.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() || from == to {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}

fn map_topic(sheet: &Sheet, topic_id: &str, f: impl Fn(&Topic) -> Topic) -> Sheet {
    Sheet {
        topics: sheet
            .topics
            .iter()
            .map(|t| if t.id == topic_id { f(t) } else { t.clone() })
            .collect(),
    }
}

fn map_sub_topic(
    sheet: &Sheet,
    topic_id: &str,
    sub_id: &str,
    f: impl Fn(&SubTopic) -> SubTopic,
) -> Sheet {
    map_topic(sheet, topic_id, |topic| Topic {
        sub_topics: topic
            .sub_topics
            .iter()
            .map(|s| if s.id == sub_id { f(s) } else { s.clone() })
            .collect(),
        ..topic.clone()
    })
}

fn map_question(
    sheet: &Sheet,
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
    f: impl Fn(&Question) -> Question,
) -> Sheet {
    map_sub_topic(sheet, topic_id, sub_id, |sub| SubTopic {
        questions: sub
            .questions
            .iter()
            .map(|q| if q.id == question_id { f(q) } else { q.clone() })
            .collect(),
        ..sub.clone()
    })
}

// ============================================================
// Topics
// ============================================================

/// Append a topic with no sub-topics. A blank title returns the sheet unchanged.
pub fn add_topic(sheet: &Sheet, title: &str) -> Sheet {
    if is_blank(title) {
        return sheet.clone();
    }
    let mut topics = sheet.topics.clone();
    topics.push(Topic::new(new_id(), title));
    Sheet { topics }
}

/// Remove a topic together with its sub-topics and questions.
pub fn delete_topic(sheet: &Sheet, topic_id: &str) -> Sheet {
    Sheet {
        topics: sheet
            .topics
            .iter()
            .filter(|t| t.id != topic_id)
            .cloned()
            .collect(),
    }
}

pub fn edit_topic(sheet: &Sheet, topic_id: &str, title: &str) -> Sheet {
    if is_blank(title) {
        return sheet.clone();
    }
    map_topic(sheet, topic_id, |t| Topic {
        title: title.to_string(),
        ..t.clone()
    })
}

pub fn reorder_topics(sheet: &Sheet, old_index: usize, new_index: usize) -> Sheet {
    Sheet {
        topics: move_item(&sheet.topics, old_index, new_index),
    }
}

// ============================================================
// Sub-topics
// ============================================================

pub fn add_sub_topic(sheet: &Sheet, topic_id: &str, title: &str) -> Sheet {
    if is_blank(title) {
        return sheet.clone();
    }
    map_topic(sheet, topic_id, |t| {
        let mut sub_topics = t.sub_topics.clone();
        sub_topics.push(SubTopic::new(new_id(), title));
        Topic {
            sub_topics,
            ..t.clone()
        }
    })
}

/// Remove a sub-topic together with its questions.
pub fn delete_sub_topic(sheet: &Sheet, topic_id: &str, sub_id: &str) -> Sheet {
    map_topic(sheet, topic_id, |t| Topic {
        sub_topics: t
            .sub_topics
            .iter()
            .filter(|s| s.id != sub_id)
            .cloned()
            .collect(),
        ..t.clone()
    })
}

pub fn edit_sub_topic(sheet: &Sheet, topic_id: &str, sub_id: &str, title: &str) -> Sheet {
    if is_blank(title) {
        return sheet.clone();
    }
    map_sub_topic(sheet, topic_id, sub_id, |s| SubTopic {
        title: title.to_string(),
        ..s.clone()
    })
}

pub fn reorder_sub_topics(
    sheet: &Sheet,
    topic_id: &str,
    old_index: usize,
    new_index: usize,
) -> Sheet {
    map_topic(sheet, topic_id, |t| Topic {
        sub_topics: move_item(&t.sub_topics, old_index, new_index),
        ..t.clone()
    })
}

// ============================================================
// Questions
// ============================================================

/// Append a question with a fresh id and `completed = false`.
pub fn add_question(sheet: &Sheet, topic_id: &str, sub_id: &str, fields: &NewQuestion) -> Sheet {
    if is_blank(&fields.title) {
        return sheet.clone();
    }
    map_sub_topic(sheet, topic_id, sub_id, |s| {
        let mut questions = s.questions.clone();
        questions.push(Question {
            id: new_id(),
            title: fields.title.clone(),
            difficulty: fields.difficulty,
            link: fields.link.clone(),
            completed: false,
        });
        SubTopic {
            questions,
            ..s.clone()
        }
    })
}

pub fn delete_question(sheet: &Sheet, topic_id: &str, sub_id: &str, question_id: &str) -> Sheet {
    map_sub_topic(sheet, topic_id, sub_id, |s| SubTopic {
        questions: s
            .questions
            .iter()
            .filter(|q| q.id != question_id)
            .cloned()
            .collect(),
        ..s.clone()
    })
}

/// Overwrite whichever fields the patch carries. A blank title in the patch
/// is ignored; the other fields still apply.
pub fn edit_question(
    sheet: &Sheet,
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
    patch: &QuestionPatch,
) -> Sheet {
    map_question(sheet, topic_id, sub_id, question_id, |q| Question {
        title: match &patch.title {
            Some(title) if !is_blank(title) => title.clone(),
            _ => q.title.clone(),
        },
        difficulty: patch.difficulty.unwrap_or(q.difficulty),
        link: patch.link.clone().unwrap_or_else(|| q.link.clone()),
        ..q.clone()
    })
}

pub fn reorder_questions(
    sheet: &Sheet,
    topic_id: &str,
    sub_id: &str,
    old_index: usize,
    new_index: usize,
) -> Sheet {
    map_sub_topic(sheet, topic_id, sub_id, |s| SubTopic {
        questions: move_item(&s.questions, old_index, new_index),
        ..s.clone()
    })
}

pub fn toggle_question_completion(
    sheet: &Sheet,
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
) -> Sheet {
    map_question(sheet, topic_id, sub_id, question_id, |q| Question {
        completed: !q.completed,
        ..q.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_item_forward_shifts_intervening_elements_back() {
        assert_eq!(move_item(&[1, 2, 3, 4], 0, 2), vec![2, 3, 1, 4]);
    }

    #[test]
    fn move_item_backward_shifts_intervening_elements_forward() {
        assert_eq!(move_item(&[1, 2, 3, 4], 3, 1), vec![1, 4, 2, 3]);
    }

    #[test]
    fn move_item_same_index_is_identity() {
        assert_eq!(move_item(&['a', 'b'], 1, 1), vec!['a', 'b']);
    }

    #[test]
    fn move_item_out_of_range_is_identity() {
        assert_eq!(move_item(&[1, 2, 3], 5, 0), vec![1, 2, 3]);
        assert_eq!(move_item(&[1, 2, 3], 0, 3), vec![1, 2, 3]);
        assert_eq!(move_item::<u8>(&[], 0, 0), Vec::<u8>::new());
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
