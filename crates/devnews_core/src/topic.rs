/// A predefined search phrase for a technology subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Phrase sent to the news service. Empty for "All Tech".
    pub value: &'static str,
    pub label: &'static str,
}

pub const TOPICS: &[Topic] = &[
    Topic { value: "", label: "All Tech" },
    Topic { value: "javascript", label: "JavaScript" },
    Topic { value: "python", label: "Python" },
    Topic { value: "typescript", label: "TypeScript" },
    Topic { value: "c++", label: "C++" },
    Topic { value: "c#", label: "C#" },
    Topic { value: "java programming", label: "Java" },
    Topic { value: "go language", label: "Go (Golang)" },
    Topic { value: "rust language", label: "Rust" },
    Topic { value: "react", label: "React" },
    Topic { value: "nextjs", label: "Next.js" },
    Topic { value: "vuejs", label: "Vue.js" },
    Topic { value: "svelte", label: "Svelte" },
    Topic { value: "nodejs", label: "Node.js" },
    Topic { value: "backend development", label: "Backend Dev" },
    Topic { value: "devops", label: "DevOps" },
    Topic { value: "docker OR kubernetes", label: "Docker / Kubernetes" },
    Topic { value: "cloud computing OR aws OR gcp OR azure", label: "Cloud" },
    Topic { value: "cybersecurity", label: "Cyber Security" },
    Topic { value: "penetration testing", label: "Pen Testing" },
    Topic { value: "network security", label: "Network Security" },
    Topic { value: "ai OR machine learning", label: "AI / Machine Learning" },
    Topic { value: "deep learning", label: "Deep Learning" },
    Topic { value: "data science", label: "Data Science" },
    Topic { value: "neural networks", label: "Neural Networks" },
    Topic { value: "web development", label: "Web Development" },
    Topic { value: "mobile development", label: "Mobile Dev" },
    Topic { value: "startup technology", label: "Startups" },
];

/// Look up a topic by value or label, ignoring ASCII case and surrounding whitespace.
pub fn find_topic(needle: &str) -> Option<&'static Topic> {
    let needle = needle.trim();
    TOPICS.iter().find(|topic| {
        topic.value.eq_ignore_ascii_case(needle) || topic.label.eq_ignore_ascii_case(needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_topic_is_all_tech() {
        assert_eq!(TOPICS[0].value, "");
        assert_eq!(TOPICS[0].label, "All Tech");
    }

    #[test]
    fn finds_by_value_or_label() {
        assert_eq!(find_topic("rust").map(|t| t.value), Some("rust language"));
        assert_eq!(find_topic("RUST LANGUAGE").map(|t| t.label), Some("Rust"));
        assert_eq!(find_topic("  Next.js ").map(|t| t.value), Some("nextjs"));
        assert!(find_topic("cobol").is_none());
    }
}
