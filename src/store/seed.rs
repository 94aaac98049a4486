//! Document the server starts with when no seed file is configured.

use crate::models::*;

fn question(id: &str, title: &str, difficulty: Difficulty, slug: &str) -> Question {
    Question {
        id: id.to_string(),
        title: title.to_string(),
        difficulty,
        link: format!("https://leetcode.com/problems/{}", slug),
        completed: false,
    }
}

fn sub_topic(id: &str, title: &str, questions: Vec<Question>) -> SubTopic {
    SubTopic {
        id: id.to_string(),
        title: title.to_string(),
        questions,
    }
}

fn topic(id: &str, title: &str, sub_topics: Vec<SubTopic>) -> Topic {
    Topic {
        id: id.to_string(),
        title: title.to_string(),
        sub_topics,
    }
}

pub fn seed_sheet() -> Sheet {
    use Difficulty::{Easy, Medium};

    Sheet {
        topics: vec![
            topic(
                "t1",
                "Arrays",
                vec![
                    sub_topic(
                        "s1",
                        "Basics",
                        vec![
                            question("q1", "Two Sum", Easy, "two-sum"),
                            question(
                                "q2",
                                "Best Time to Buy and Sell Stock",
                                Easy,
                                "best-time-to-buy-and-sell-stock",
                            ),
                        ],
                    ),
                    sub_topic(
                        "s2",
                        "Prefix Sum",
                        vec![question(
                            "q3",
                            "Subarray Sum Equals K",
                            Medium,
                            "subarray-sum-equals-k",
                        )],
                    ),
                ],
            ),
            topic(
                "t2",
                "Strings",
                vec![
                    sub_topic(
                        "s3",
                        "Two Pointers",
                        vec![
                            question("q4", "Valid Palindrome", Easy, "valid-palindrome"),
                            question(
                                "q5",
                                "Reverse Words in a String",
                                Medium,
                                "reverse-words-in-a-string",
                            ),
                        ],
                    ),
                    sub_topic(
                        "s4",
                        "Sliding Window",
                        vec![question(
                            "q6",
                            "Longest Substring Without Repeating Characters",
                            Medium,
                            "longest-substring-without-repeating-characters",
                        )],
                    ),
                ],
            ),
            topic(
                "t3",
                "Linked List",
                vec![
                    sub_topic(
                        "s5",
                        "Basics",
                        vec![
                            question("q7", "Reverse Linked List", Easy, "reverse-linked-list"),
                            question(
                                "q8",
                                "Middle of the Linked List",
                                Easy,
                                "middle-of-the-linked-list",
                            ),
                        ],
                    ),
                    sub_topic(
                        "s6",
                        "Fast & Slow Pointer",
                        vec![question("q9", "Linked List Cycle", Easy, "linked-list-cycle")],
                    ),
                ],
            ),
        ],
    }
}
