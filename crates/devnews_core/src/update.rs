use crate::{interpret_response, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicSelected(topic) => {
            state.set_topic(topic);
            Vec::new()
        }
        Msg::KeywordChanged(keyword) => {
            state.set_keyword(keyword);
            Vec::new()
        }
        Msg::RecentOnlyToggled(recent_only) => {
            state.set_recent_only(recent_only);
            Vec::new()
        }
        Msg::SearchSubmitted { now } => {
            let superseded = state.in_flight();
            let request_id = state.begin_search();
            let query = state.query();
            let start_date = query
                .recent_only
                .then(|| state.recency().start_date(now));

            let mut effects = Vec::with_capacity(2);
            if let Some(request_id) = superseded {
                effects.push(Effect::CancelSearch { request_id });
            }
            effects.push(Effect::Search {
                request_id,
                keywords: query.combined(),
                start_date,
            });
            effects
        }
        Msg::SearchCompleted {
            request_id,
            result,
            now,
        } => {
            // Only the latest submission may touch the results.
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }

            let recent_only = state.submitted().is_some_and(|query| query.recent_only);
            match result.and_then(|body| interpret_response(&body)) {
                Ok(articles) if recent_only => {
                    let articles = state.recency().apply(articles, now);
                    state.finish_success(articles);
                }
                Ok(articles) => state.finish_success(articles),
                Err(message) => state.finish_error(message),
            }
            Vec::new()
        }
    };

    (state, effects)
}
