//! Task descriptions for the two pipeline stages

use indoc::formatdoc;

/// A task description plus the shape of output expected from the backend
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// What the role should do, including the data it works on
    pub description: String,
    /// What a complete answer looks like
    pub expected_output: String,
}

/// Build the preference-analysis task from the rendered poll report
#[must_use]
pub fn preference_analysis(poll_report: &str) -> TaskSpec {
    TaskSpec {
        description: formatdoc! {"
            Analyze the poll responses to identify group consensus and preferences
            for the meetup. Look for patterns in availability, budget constraints,
            and cuisine preferences. Identify the optimal timing and constraints
            that work for the majority of the group.

            Poll Data:
            {poll_report}

            Please analyze this data to find:
            1. Common availability windows that work for most people
            2. Budget range that accommodates the group
            3. Cuisine preferences and any conflicts to resolve
            4. Recommendations for optimal meetup timing and constraints"},
        expected_output: formatdoc! {"
            A comprehensive analysis of group preferences including:
            - Recommended time slots with participant availability
            - Agreed budget range for the group
            - Cuisine preference consensus or compromise suggestions
            - Any conflicts identified and proposed resolutions"},
    }
}

/// Build the venue-research task from the search context and venue report
#[must_use]
pub fn venue_research(
    group_size: usize,
    keyword: &str,
    location_name: &str,
    venue_report: &str,
) -> TaskSpec {
    TaskSpec {
        description: formatdoc! {"
            Use the group preference analysis and real venue data to provide the
            best venue recommendations for this meetup. Consider the group's
            availability consensus, budget constraints, and cuisine preferences
            identified in the preference analysis.

            Group Size: {group_size}
            Initial Search: {keyword}
            Location: {location_name}

            Venue Data:
            {venue_report}

            Important: Review the preference analysis results from the previous
            task to understand the group's consensus on timing, budget, and
            cuisine. Use this analysis to filter and recommend venues that match
            the group's collective preferences."},
        expected_output: formatdoc! {"
            Final venue recommendations that incorporate both the group preference
            analysis and real venue data, including:
            - Top 3 recommended venues with full details
            - How each venue aligns with the group's consensus preferences
            - Recommended timing based on group availability
            - Budget compatibility confirmation
            - Complete meetup plan ready for execution"},
    }
}
