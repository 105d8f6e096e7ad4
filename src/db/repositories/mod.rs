mod kv_entries;
mod videos;
