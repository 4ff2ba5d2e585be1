use std::collections::{HashMap, HashSet};
use std::path::Path;

use dashmap::DashMap;
use shared::models::{Album, AlbumSummary, MediaItem, MediaOrderEntry};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};

use super::seed::{SeedAlbum, SeedFile};
use crate::core::{Result, ServerError};

/// 单个相册及其按展示顺序排列的媒体
#[derive(Debug, Clone)]
struct AlbumRecord {
    album: Album,
    media: Vec<MediaItem>,
}

/// 相册存储
///
/// 每个相册一个 DashMap 条目；排序更新在条目锁内先整体校验再写入，
/// 校验失败时相册保持原样
#[derive(Debug, Default)]
pub struct AlbumStore {
    albums: DashMap<i64, AlbumRecord>,
}

impl AlbumStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedFile) -> Result<Self> {
        let store = Self::new();
        for album in seed.albums {
            if store.albums.contains_key(&album.id) {
                return Err(ServerError::SeedInvalid(format!(
                    "duplicate album id {}",
                    album.id
                )));
            }
            store.insert_seed_album(album)?;
        }
        Ok(store)
    }

    pub fn load_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ServerError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: SeedFile = serde_json::from_str(&raw).map_err(|source| ServerError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_seed(seed)
    }

    fn insert_seed_album(&self, seed: SeedAlbum) -> Result<()> {
        let album_id = seed.id;
        let mut media: Vec<MediaItem> = seed
            .media
            .into_iter()
            .map(|m| m.into_media(album_id))
            .collect();

        let mut seen = HashSet::with_capacity(media.len());
        if let Some(dup) = media.iter().find(|m| !seen.insert(m.id)) {
            return Err(ServerError::SeedInvalid(format!(
                "media {} appears twice in album {}",
                dup.id, album_id
            )));
        }
        // 稳定排序：未指定 sort_order 的保持文件顺序
        media.sort_by_key(|m| m.sort_order);

        self.insert_album(
            Album {
                id: album_id,
                title: seed.title,
                description: seed.description,
                updated_at: now_millis(),
            },
            media,
        );
        Ok(())
    }

    /// 插入或替换相册；媒体按给定顺序重新编号
    pub fn insert_album(&self, album: Album, media: Vec<MediaItem>) {
        let album_id = album.id;
        let media = media
            .into_iter()
            .enumerate()
            .map(|(i, mut m)| {
                m.album_id = album_id;
                m.sort_order = i as i32 + 1;
                m
            })
            .collect();
        self.albums.insert(album_id, AlbumRecord { album, media });
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// 所有相册，按 id 升序
    pub fn list_albums(&self) -> Vec<AlbumSummary> {
        let mut albums: Vec<AlbumSummary> = self
            .albums
            .iter()
            .map(|entry| AlbumSummary {
                album: entry.album.clone(),
                media_count: entry.media.len(),
            })
            .collect();
        albums.sort_by_key(|s| s.album.id);
        albums
    }

    pub fn get_album(&self, album_id: i64) -> AppResult<Album> {
        self.albums
            .get(&album_id)
            .map(|entry| entry.album.clone())
            .ok_or_else(|| AppError::album_not_found(album_id))
    }

    /// 媒体列表，按 sort_order 排列
    pub fn list_media(&self, album_id: i64) -> AppResult<Vec<MediaItem>> {
        self.albums
            .get(&album_id)
            .map(|entry| entry.media.clone())
            .ok_or_else(|| AppError::album_not_found(album_id))
    }

    /// 整体替换相册的媒体顺序
    ///
    /// `entries` 必须按顺序列出相册的每个媒体恰好一次：
    /// 第 i 项 `position == i` 且 `order_index == i + 1`。
    /// 任一校验失败都不修改相册。返回更新的条目数。
    pub fn apply_sort_order(&self, album_id: i64, entries: &[MediaOrderEntry]) -> AppResult<usize> {
        let mut record = self
            .albums
            .get_mut(&album_id)
            .ok_or_else(|| AppError::album_not_found(album_id))?;

        validate_entries(album_id, &record.media, entries)?;

        let mut by_id: HashMap<i64, MediaItem> =
            record.media.drain(..).map(|m| (m.id, m)).collect();
        let mut reordered = Vec::with_capacity(entries.len());
        for entry in entries {
            // validate_entries 已保证每个 id 存在且唯一
            if let Some(mut item) = by_id.remove(&entry.id) {
                item.sort_order = entry.order_index as i32;
                reordered.push(item);
            }
        }
        record.media = reordered;
        record.album.updated_at = now_millis();

        tracing::info!(album_id, count = entries.len(), "Media sort order updated");
        Ok(entries.len())
    }
}

fn validate_entries(album_id: i64, media: &[MediaItem], entries: &[MediaOrderEntry]) -> AppResult<()> {
    if media.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::AlbumEmpty,
            format!("Album {} has no media to reorder", album_id),
        )
        .with_detail("album_id", album_id));
    }

    if entries.len() != media.len() {
        return Err(AppError::with_message(
            ErrorCode::SortOrderIncomplete,
            format!(
                "Sort order lists {} items but album {} has {}",
                entries.len(),
                album_id,
                media.len()
            ),
        )
        .with_detail("expected", media.len())
        .with_detail("received", entries.len()));
    }

    let known: HashSet<i64> = media.iter().map(|m| m.id).collect();
    let mut seen = HashSet::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if !known.contains(&entry.id) {
            return Err(AppError::with_message(
                ErrorCode::MediaNotFound,
                format!("Media {} is not in album {}", entry.id, album_id),
            )
            .with_detail("media_id", entry.id));
        }
        if !seen.insert(entry.id) {
            return Err(AppError::with_message(
                ErrorCode::SortOrderDuplicate,
                format!("Media {} is listed more than once", entry.id),
            )
            .with_detail("media_id", entry.id));
        }
        if entry.position as usize != i || entry.order_index as usize != i + 1 {
            return Err(AppError::with_message(
                ErrorCode::SortOrderGap,
                format!(
                    "Entry {} has position {} and order index {}, expected {} and {}",
                    i,
                    entry.position,
                    entry.order_index,
                    i,
                    i + 1
                ),
            )
            .with_detail("media_id", entry.id)
            .with_detail("position", entry.position));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeedMedia;
    use shared::models::{MediaKind, OrderEntry};

    fn seed_media(id: i64, label: &str, sort_order: Option<i32>) -> SeedMedia {
        SeedMedia {
            id,
            url: format!("/m/{id}.jpg"),
            label: label.to_string(),
            kind: MediaKind::Image,
            captured_at: None,
            byte_size: None,
            sort_order,
        }
    }

    fn store() -> AlbumStore {
        AlbumStore::from_seed(SeedFile {
            albums: vec![
                SeedAlbum {
                    id: 2,
                    title: "Glazes".into(),
                    description: None,
                    media: vec![],
                },
                SeedAlbum {
                    id: 1,
                    title: "Studio".into(),
                    description: Some("Wheel and kiln".into()),
                    media: vec![
                        seed_media(10, "wheel", None),
                        seed_media(11, "kiln", None),
                        seed_media(12, "shelf", None),
                    ],
                },
            ],
        })
        .unwrap()
    }

    fn media_ids(store: &AlbumStore, album_id: i64) -> Vec<i64> {
        store.list_media(album_id).unwrap().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_seed_numbers_media() {
        let store = store();
        let media = store.list_media(1).unwrap();
        assert_eq!(media.iter().map(|m| m.sort_order).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(media.iter().all(|m| m.album_id == 1));

        let albums = store.list_albums();
        assert_eq!(albums.iter().map(|a| a.album.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(albums[0].media_count, 3);
        assert_eq!(albums[1].media_count, 0);
    }

    #[test]
    fn test_seed_honours_sort_order() {
        let store = AlbumStore::from_seed(SeedFile {
            albums: vec![SeedAlbum {
                id: 1,
                title: "t".into(),
                description: None,
                media: vec![
                    seed_media(10, "a", Some(3)),
                    seed_media(11, "b", Some(1)),
                    seed_media(12, "c", Some(2)),
                ],
            }],
        })
        .unwrap();
        assert_eq!(media_ids(&store, 1), vec![11, 12, 10]);
    }

    #[test]
    fn test_seed_rejects_duplicates() {
        let dup_album = SeedFile {
            albums: vec![
                SeedAlbum { id: 1, title: "a".into(), description: None, media: vec![] },
                SeedAlbum { id: 1, title: "b".into(), description: None, media: vec![] },
            ],
        };
        assert!(matches!(AlbumStore::from_seed(dup_album), Err(ServerError::SeedInvalid(_))));

        let dup_media = SeedFile {
            albums: vec![SeedAlbum {
                id: 1,
                title: "a".into(),
                description: None,
                media: vec![seed_media(10, "x", None), seed_media(10, "y", None)],
            }],
        };
        assert!(matches!(AlbumStore::from_seed(dup_media), Err(ServerError::SeedInvalid(_))));
    }

    #[test]
    fn test_apply_sort_order() {
        let store = store();
        let before = store.get_album(1).unwrap().updated_at;

        let updated = store
            .apply_sort_order(1, &OrderEntry::sequence([12, 10, 11]))
            .unwrap();

        assert_eq!(updated, 3);
        assert_eq!(media_ids(&store, 1), vec![12, 10, 11]);
        let media = store.list_media(1).unwrap();
        assert_eq!(media.iter().map(|m| m.sort_order).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(store.get_album(1).unwrap().updated_at >= before);
    }

    fn rejected(store: &AlbumStore, album_id: i64, entries: &[MediaOrderEntry]) -> ErrorCode {
        let code = store.apply_sort_order(album_id, entries).unwrap_err().code;
        // 失败时顺序不变
        if album_id == 1 {
            assert_eq!(media_ids(store, 1), vec![10, 11, 12]);
        }
        code
    }

    #[test]
    fn test_apply_sort_order_validation() {
        let store = store();

        assert_eq!(
            rejected(&store, 9, &OrderEntry::sequence([10])),
            ErrorCode::AlbumNotFound
        );
        assert_eq!(
            rejected(&store, 2, &OrderEntry::sequence(Vec::<i64>::new())),
            ErrorCode::AlbumEmpty
        );
        assert_eq!(
            rejected(&store, 1, &OrderEntry::sequence([10, 11])),
            ErrorCode::SortOrderIncomplete
        );
        assert_eq!(
            rejected(&store, 1, &OrderEntry::sequence([10, 11, 99])),
            ErrorCode::MediaNotFound
        );
        assert_eq!(
            rejected(&store, 1, &OrderEntry::sequence([10, 11, 10])),
            ErrorCode::SortOrderDuplicate
        );

        let gap = vec![
            OrderEntry::new(10, 0),
            OrderEntry::new(11, 1),
            OrderEntry::new(12, 3),
        ];
        assert_eq!(rejected(&store, 1, &gap), ErrorCode::SortOrderGap);

        let mut shifted = OrderEntry::sequence([10, 11, 12]);
        shifted[1].order_index = 5;
        assert_eq!(rejected(&store, 1, &shifted), ErrorCode::SortOrderGap);
    }
}
