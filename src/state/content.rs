//! In-memory content cache.
//!
//! Holds the server-confirmed posts, comments, and favorites and keeps
//! them consistent after each mutation without a full reload. The
//! stores are normalized: comments and favorites live in exactly one
//! flat collection each, keyed by id, and detail views derive their
//! lists by filtering on the parent post id. Posts arriving with
//! embedded lists have those absorbed into the flat stores on merge, so
//! there is no second copy to drift.
//!
//! Every mutation here is a local patch applied after a successful
//! server response; failures never reach these methods, which keeps the
//! cache all-or-nothing per action.

use std::collections::HashSet;

use crate::models::{Comment, Favorite, Post};

/// The normalized client-side content state.
#[derive(Debug, Default)]
pub struct ContentCache {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    favorites: Vec<Favorite>,
    /// Post id currently open in the detail view.
    viewing: Option<i64>,
    /// Posts with a favorite create/delete in flight. Guards against
    /// double-toggling before the first response lands.
    favorite_inflight: HashSet<i64>,
}

/// Empty the embedded transport lists before storing a post; the flat
/// stores are the source of truth.
fn strip_embedded(mut post: Post) -> Post {
    post.comments.clear();
    post.favorites.clear();
    post
}

impl ContentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Replace the whole cache with the result of a full load.
    ///
    /// Keeps the detail selection only if the post still exists.
    pub fn replace_all(&mut self, posts: Vec<Post>, comments: Vec<Comment>, favorites: Vec<Favorite>) {
        self.posts = posts.into_iter().map(strip_embedded).collect();
        self.comments = comments;
        self.favorites = favorites;
        if let Some(id) = self.viewing {
            if self.post(id).is_none() {
                self.viewing = None;
            }
        }
    }

    /// Merge a post-detail response: replace the post by id (insert if
    /// unseen) and absorb its comment/favorite lists into the flat
    /// stores, replacing whatever was held for that post.
    pub fn merge_post_detail(&mut self, post: Post, fetched_comments: Vec<Comment>) {
        let post_id = post.id;

        // The separately fetched comment list wins; the embedded copy is
        // a fallback for servers that answer the detail alone.
        let comments = if fetched_comments.is_empty() {
            post.comments.clone()
        } else {
            fetched_comments
        };
        self.comments.retain(|c| c.post_id != post_id);
        self.comments.extend(comments);

        self.favorites.retain(|f| f.post_id != post_id);
        self.favorites.extend(post.favorites.clone());

        let post = strip_embedded(post);
        match self.posts.iter_mut().find(|p| p.id == post_id) {
            Some(existing) => *existing = post,
            None => self.posts.push(post),
        }
    }

    // ------------------------------------------------------------------
    // Post mutations
    // ------------------------------------------------------------------

    /// Insert a freshly created post from the server response.
    pub fn insert_post(&mut self, post: Post) {
        let post = strip_embedded(post);
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
        } else {
            self.posts.push(post);
        }
    }

    /// Patch a post's title and body in place.
    pub fn apply_post_update(&mut self, id: i64, title: &str, body: &str) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
            post.title = title.to_string();
            post.body = body.to_string();
        }
    }

    /// Remove a post and, mirroring the server's cascade, its local
    /// comments and favorites. Clears the detail selection if it pointed
    /// at the removed post; returns true when it did.
    pub fn remove_post(&mut self, id: i64) -> bool {
        self.posts.retain(|p| p.id != id);
        self.comments.retain(|c| c.post_id != id);
        self.favorites.retain(|f| f.post_id != id);

        let was_viewing = self.viewing == Some(id);
        if was_viewing {
            self.viewing = None;
        }
        was_viewing
    }

    // ------------------------------------------------------------------
    // Comment mutations
    // ------------------------------------------------------------------

    /// Insert a freshly created comment from the server response.
    pub fn insert_comment(&mut self, comment: Comment) {
        if let Some(existing) = self.comments.iter_mut().find(|c| c.id == comment.id) {
            *existing = comment;
        } else {
            self.comments.push(comment);
        }
    }

    /// Replace a comment's text in place.
    pub fn apply_comment_edit(&mut self, id: i64, text: &str) {
        if let Some(comment) = self.comments.iter_mut().find(|c| c.id == id) {
            comment.text = text.to_string();
        }
    }

    /// Remove a comment.
    pub fn remove_comment(&mut self, id: i64) {
        self.comments.retain(|c| c.id != id);
    }

    // ------------------------------------------------------------------
    // Favorite mutations
    // ------------------------------------------------------------------

    /// Record a server-confirmed favorite and bump the post's count.
    pub fn apply_favorite_added(&mut self, favorite: Favorite) {
        if self.favorites.iter().any(|f| f.id == favorite.id) {
            return;
        }
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == favorite.post_id) {
            post.favorite_count += 1;
        }
        self.favorites.push(favorite);
    }

    /// Remove a server-confirmed unfavorite and drop the post's count.
    pub fn apply_favorite_removed(&mut self, favorite_id: i64) {
        let Some(index) = self.favorites.iter().position(|f| f.id == favorite_id) else {
            return;
        };
        let favorite = self.favorites.remove(index);
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == favorite.post_id) {
            post.favorite_count = (post.favorite_count - 1).max(0);
        }
    }

    /// Mark a favorite toggle as in flight for the post. Returns false
    /// if one is already pending, in which case the caller must not
    /// issue another request.
    pub fn begin_favorite(&mut self, post_id: i64) -> bool {
        self.favorite_inflight.insert(post_id)
    }

    /// Clear the in-flight mark once the response (or error) arrived.
    pub fn finish_favorite(&mut self, post_id: i64) {
        self.favorite_inflight.remove(&post_id);
    }

    /// Check whether a favorite toggle is pending for the post.
    pub fn favorite_in_flight(&self, post_id: i64) -> bool {
        self.favorite_inflight.contains(&post_id)
    }

    // ------------------------------------------------------------------
    // Detail selection
    // ------------------------------------------------------------------

    /// Select the post shown in the detail view.
    pub fn set_viewing(&mut self, post_id: Option<i64>) {
        self.viewing = post_id;
    }

    /// The post id currently open in the detail view.
    pub fn viewing(&self) -> Option<i64> {
        self.viewing
    }

    /// The post currently open in the detail view.
    pub fn viewed_post(&self) -> Option<&Post> {
        self.viewing.and_then(|id| self.post(id))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All posts, in server order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// All comments.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// All favorites.
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Look up a post by id.
    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// A post's comments, derived from the flat store.
    pub fn comments_for(&self, post_id: i64) -> Vec<&Comment> {
        self.comments.iter().filter(|c| c.post_id == post_id).collect()
    }

    /// Look up a comment by id.
    pub fn comment(&self, id: i64) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// A post's favorites, derived from the flat store.
    pub fn favorites_for(&self, post_id: i64) -> Vec<&Favorite> {
        self.favorites.iter().filter(|f| f.post_id == post_id).collect()
    }

    /// The favorite record a user holds on a post, if any.
    pub fn favorite_by(&self, post_id: i64, user_id: i64) -> Option<&Favorite> {
        self.favorites
            .iter()
            .find(|f| f.post_id == post_id && f.user_id == user_id)
    }

    /// Whether a user has favorited a post.
    pub fn is_favorited_by(&self, post_id: i64, user_id: i64) -> bool {
        self.favorite_by(post_id, user_id).is_some()
    }

    /// Posts owned by a user.
    pub fn posts_by(&self, user_id: i64) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.owner_id == user_id).collect()
    }

    /// Posts a user has favorited.
    pub fn favorited_posts_of(&self, user_id: i64) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| self.is_favorited_by(p.id, user_id))
            .collect()
    }

    /// Drop everything. Used on logout.
    pub fn clear(&mut self) {
        self.posts.clear();
        self.comments.clear();
        self.favorites.clear();
        self.viewing = None;
        self.favorite_inflight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, owner_id: i64) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            body: "body".to_string(),
            image: None,
            owner_id,
            owner: None,
            created_at: None,
            favorite_count: 0,
            favorites: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn comment(id: i64, post_id: i64, text: &str) -> Comment {
        Comment {
            id,
            post_id,
            author_id: 1,
            text: text.to_string(),
            created_at: None,
            author: None,
        }
    }

    fn favorite(id: i64, post_id: i64, user_id: i64) -> Favorite {
        Favorite { id, post_id, user_id }
    }

    #[test]
    fn test_replace_all() {
        let mut cache = ContentCache::new();
        cache.replace_all(
            vec![post(1, 1), post(2, 2)],
            vec![comment(1, 1, "hi")],
            vec![favorite(1, 1, 2)],
        );
        assert_eq!(cache.posts().len(), 2);
        assert_eq!(cache.comments().len(), 1);
        assert_eq!(cache.favorites().len(), 1);
    }

    #[test]
    fn test_replace_all_drops_stale_viewing() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(1, 1)], vec![], vec![]);
        cache.set_viewing(Some(1));

        cache.replace_all(vec![post(2, 1)], vec![], vec![]);
        assert_eq!(cache.viewing(), None);
    }

    #[test]
    fn test_merge_post_detail_replaces_by_id() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(5, 1)], vec![], vec![]);

        let mut detail = post(5, 1);
        detail.title = "Updated".to_string();
        cache.merge_post_detail(detail, vec![comment(9, 5, "old")]);

        assert_eq!(cache.posts().len(), 1);
        assert_eq!(cache.post(5).unwrap().title, "Updated");
        assert_eq!(cache.comments_for(5).len(), 1);
    }

    #[test]
    fn test_merge_post_detail_absorbs_embedded_lists() {
        let mut cache = ContentCache::new();
        let mut detail = post(5, 1);
        detail.favorites = vec![favorite(3, 5, 2)];
        detail.comments = vec![comment(9, 5, "embedded")];

        // No separately fetched comments; embedded copy is absorbed
        cache.merge_post_detail(detail, vec![]);

        assert_eq!(cache.comments_for(5)[0].text, "embedded");
        assert!(cache.is_favorited_by(5, 2));
        // The stored post keeps no second copy
        let stored = cache.post(5).unwrap();
        assert!(stored.comments.is_empty());
        assert!(stored.favorites.is_empty());
    }

    #[test]
    fn test_merge_post_detail_replaces_previous_comments() {
        let mut cache = ContentCache::new();
        cache.replace_all(
            vec![post(5, 1)],
            vec![comment(9, 5, "stale"), comment(10, 6, "other post")],
            vec![],
        );

        cache.merge_post_detail(post(5, 1), vec![comment(11, 5, "fresh")]);

        let for_post = cache.comments_for(5);
        assert_eq!(for_post.len(), 1);
        assert_eq!(for_post[0].text, "fresh");
        // Comments of other posts are untouched
        assert_eq!(cache.comments_for(6).len(), 1);
    }

    #[test]
    fn test_insert_post_appends_once() {
        let mut cache = ContentCache::new();
        cache.insert_post(post(1, 1));
        cache.insert_post(post(1, 1));
        assert_eq!(cache.posts().len(), 1);
    }

    #[test]
    fn test_apply_post_update() {
        let mut cache = ContentCache::new();
        cache.insert_post(post(1, 1));
        cache.apply_post_update(1, "New title", "New body");
        let updated = cache.post(1).unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.body, "New body");
    }

    #[test]
    fn test_remove_post_cascades_and_clears_viewing() {
        let mut cache = ContentCache::new();
        cache.replace_all(
            vec![post(5, 1), post(6, 1)],
            vec![comment(1, 5, "a"), comment(2, 6, "b")],
            vec![favorite(1, 5, 2), favorite(2, 6, 2)],
        );
        cache.set_viewing(Some(5));

        let was_viewing = cache.remove_post(5);

        assert!(was_viewing);
        assert_eq!(cache.viewing(), None);
        assert!(cache.post(5).is_none());
        assert!(cache.comments_for(5).is_empty());
        assert!(cache.favorites_for(5).is_empty());
        // Unrelated content survives
        assert!(cache.post(6).is_some());
        assert_eq!(cache.comments_for(6).len(), 1);
    }

    #[test]
    fn test_remove_post_not_viewing() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(5, 1), post(6, 1)], vec![], vec![]);
        cache.set_viewing(Some(6));

        assert!(!cache.remove_post(5));
        assert_eq!(cache.viewing(), Some(6));
    }

    #[test]
    fn test_comment_edit_visible_in_flat_and_derived_lists() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(5, 1)], vec![comment(9, 5, "old")], vec![]);
        cache.set_viewing(Some(5));

        cache.apply_comment_edit(9, "new");

        assert_eq!(cache.comment(9).unwrap().text, "new");
        let derived = cache.comments_for(cache.viewing().unwrap());
        assert_eq!(derived[0].text, "new");
    }

    #[test]
    fn test_remove_comment() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(5, 1)], vec![comment(9, 5, "x")], vec![]);
        cache.remove_comment(9);
        assert!(cache.comment(9).is_none());
        assert!(cache.comments_for(5).is_empty());
    }

    #[test]
    fn test_favorite_add_and_remove_round_trip() {
        let mut cache = ContentCache::new();
        let mut p = post(5, 1);
        p.favorite_count = 2;
        cache.insert_post(p);

        cache.apply_favorite_added(favorite(7, 5, 3));
        assert_eq!(cache.post(5).unwrap().favorite_count, 3);
        assert!(cache.is_favorited_by(5, 3));

        cache.apply_favorite_removed(7);
        assert_eq!(cache.post(5).unwrap().favorite_count, 2);
        assert!(!cache.is_favorited_by(5, 3));
        assert!(cache.favorites().is_empty());
    }

    #[test]
    fn test_favorite_added_is_idempotent_per_id() {
        let mut cache = ContentCache::new();
        cache.insert_post(post(5, 1));
        cache.apply_favorite_added(favorite(7, 5, 3));
        cache.apply_favorite_added(favorite(7, 5, 3));
        assert_eq!(cache.favorites().len(), 1);
        assert_eq!(cache.post(5).unwrap().favorite_count, 1);
    }

    #[test]
    fn test_favorite_removed_unknown_id_is_noop() {
        let mut cache = ContentCache::new();
        cache.insert_post(post(5, 1));
        cache.apply_favorite_removed(99);
        assert_eq!(cache.post(5).unwrap().favorite_count, 0);
    }

    #[test]
    fn test_favorite_count_never_negative() {
        let mut cache = ContentCache::new();
        cache.insert_post(post(5, 1));
        cache.favorites.push(favorite(7, 5, 3));
        // Count was never incremented; removal must not underflow
        cache.apply_favorite_removed(7);
        assert_eq!(cache.post(5).unwrap().favorite_count, 0);
    }

    #[test]
    fn test_favorite_inflight_guard() {
        let mut cache = ContentCache::new();
        assert!(cache.begin_favorite(5));
        assert!(cache.favorite_in_flight(5));
        // Second begin while pending is rejected
        assert!(!cache.begin_favorite(5));
        // Other posts are unaffected
        assert!(cache.begin_favorite(6));

        cache.finish_favorite(5);
        assert!(!cache.favorite_in_flight(5));
        assert!(cache.begin_favorite(5));
    }

    #[test]
    fn test_profile_queries() {
        let mut cache = ContentCache::new();
        cache.replace_all(
            vec![post(1, 1), post(2, 2), post(3, 1)],
            vec![],
            vec![favorite(1, 2, 1)],
        );

        let mine = cache.posts_by(1);
        assert_eq!(mine.len(), 2);
        let favorited = cache.favorited_posts_of(1);
        assert_eq!(favorited.len(), 1);
        assert_eq!(favorited[0].id, 2);
    }

    #[test]
    fn test_clear() {
        let mut cache = ContentCache::new();
        cache.replace_all(vec![post(1, 1)], vec![comment(1, 1, "x")], vec![favorite(1, 1, 2)]);
        cache.set_viewing(Some(1));
        cache.begin_favorite(1);

        cache.clear();

        assert!(cache.posts().is_empty());
        assert!(cache.comments().is_empty());
        assert!(cache.favorites().is_empty());
        assert_eq!(cache.viewing(), None);
        assert!(!cache.favorite_in_flight(1));
    }
}
