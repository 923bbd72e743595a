/*
 * Copyright 2019-2020 Wren Powell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use cmis_fs::adapter::{FileType, FilesystemAdapter, Metadata, Pagination, WriteConfig};
use common::*;

mod common;

fn paths(entries: &[Metadata]) -> Vec<&str> {
    entries.iter().map(|entry| entry.path.as_str()).collect()
}

/// Return an adapter containing a small tree of clients.
#[fixture]
fn tree(mut adapter: TestAdapter, config: WriteConfig, buffer: Vec<u8>) -> TestAdapter {
    adapter
        .write("Clients/44-000001/invoice.pdf", &buffer, &config)
        .unwrap();
    adapter.create_dir("Clients/44-000002", &config).unwrap();
    adapter.write("readme.txt", &buffer, &config).unwrap();
    adapter.session_mut().clear();
    adapter
}

/// Return an adapter containing ten files written in a random order.
#[fixture]
fn shuffled(mut adapter: TestAdapter, config: WriteConfig) -> TestAdapter {
    let mut names = (0..10)
        .map(|index| format!("Clients/file-{:02}.txt", index))
        .collect::<Vec<_>>();
    names.shuffle(&mut SmallRng::from_entropy());
    for name in names {
        adapter.write(&name, &random_bytes(16), &config).unwrap();
    }
    adapter.session_mut().clear();
    adapter
}

#[rstest]
fn list_direct_children(mut tree: TestAdapter) -> anyhow::Result<()> {
    let entries = tree.list_contents("", false)?;

    assert_that!(paths(&entries)).is_equal_to(vec!["Clients", "readme.txt"]);
    assert_that!(entries[0].file_type).is_equal_to(Some(FileType::Dir));
    assert_that!(entries[1].file_type).is_equal_to(Some(FileType::File));
    assert_that!(tree.session().count(|call| matches!(call, Call::Children(_))))
        .is_equal_to(1);
    Ok(())
}

#[rstest]
fn list_recursively_depth_first(mut tree: TestAdapter) -> anyhow::Result<()> {
    let entries = tree.list_contents("", true)?;

    assert_that!(paths(&entries)).is_equal_to(vec![
        "Clients",
        "Clients/44-000001",
        "Clients/44-000001/invoice.pdf",
        "Clients/44-000002",
        "readme.txt",
    ]);
    Ok(())
}

#[rstest]
fn list_subdirectory(mut tree: TestAdapter) -> anyhow::Result<()> {
    let entries = tree.list_contents("Clients/44-000001", false)?;

    assert_that!(paths(&entries)).is_equal_to(vec!["Clients/44-000001/invoice.pdf"]);
    assert_that!(entries[0].size).is_some();
    Ok(())
}

#[rstest]
fn listing_file_returns_nothing(mut tree: TestAdapter) -> anyhow::Result<()> {
    assert_that!(tree.list_contents("readme.txt", true)?).is_empty();
    Ok(())
}

#[rstest]
fn listing_missing_directory_errs(mut tree: TestAdapter) {
    assert_that!(tree.list_contents("Missing", false))
        .is_err_variant(cmis_fs::Error::NotFound(String::new()));
}

#[rstest]
fn root_metadata_has_empty_path(mut tree: TestAdapter) -> anyhow::Result<()> {
    let metadata = tree.metadata("")?;

    assert_that!(metadata.path.as_str()).is_equal_to("");
    assert_that!(metadata.is_dir()).is_true();
    Ok(())
}

#[rstest]
fn paginated_listing_returns_bounded_page(mut shuffled: TestAdapter) -> anyhow::Result<()> {
    let pagination = Pagination::new(2, Some(5)).order_by_name(true);

    let page = shuffled.list_contents_paginated("Clients", false, &pagination)?;

    assert_that!(paths(&page.entries)).is_equal_to(vec![
        "Clients/file-02.txt",
        "Clients/file-03.txt",
        "Clients/file-04.txt",
        "Clients/file-05.txt",
        "Clients/file-06.txt",
    ]);
    assert_that!(page.total).is_equal_to(Some(10));
    Ok(())
}

#[rstest]
fn paginated_listing_without_limit_returns_rest(mut shuffled: TestAdapter) -> anyhow::Result<()> {
    let pagination = Pagination::new(7, None).order_by_name(true);

    let page = shuffled.list_contents_paginated("Clients", false, &pagination)?;

    assert_that!(paths(&page.entries)).is_equal_to(vec![
        "Clients/file-07.txt",
        "Clients/file-08.txt",
        "Clients/file-09.txt",
    ]);
    assert_that!(page.total).is_equal_to(Some(10));
    Ok(())
}

#[rstest]
fn default_pagination_returns_everything(mut shuffled: TestAdapter) -> anyhow::Result<()> {
    let page = shuffled.list_contents_paginated("Clients", false, &Pagination::default())?;

    assert_that!(page.entries).has_length(10);
    assert_that!(page.total).is_equal_to(Some(10));
    Ok(())
}

#[rstest]
fn recursive_pagination_bounds_every_level(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    for directory in &["b", "a"] {
        for file in &["2.txt", "0.txt", "1.txt"] {
            let path = format!("{}/{}", directory, file);
            adapter.write(&path, &random_bytes(16), &config)?;
        }
    }
    adapter.write("c.txt", &random_bytes(16), &config)?;

    let pagination = Pagination::new(0, Some(2)).order_by_name(true);
    let page = adapter.list_contents_paginated("", true, &pagination)?;

    assert_that!(paths(&page.entries)).is_equal_to(vec![
        "a", "a/0.txt", "a/1.txt", "b", "b/0.txt", "b/1.txt",
    ]);
    assert_that!(page.total).is_equal_to(Some(3));
    Ok(())
}

#[rstest]
fn paginated_listing_of_file_is_empty(mut tree: TestAdapter) -> anyhow::Result<()> {
    let page = tree.list_contents_paginated("readme.txt", false, &Pagination::default())?;

    assert_that!(page.entries).is_empty();
    assert_that!(page.total).is_none();
    Ok(())
}

#[rstest]
fn paginated_listing_of_missing_directory_errs(mut tree: TestAdapter) {
    assert_that!(tree.list_contents_paginated("Missing", false, &Pagination::default()))
        .is_err_variant(cmis_fs::Error::NotFound(String::new()));
}

#[rstest]
fn listing_is_relative_to_prefix(
    mut prefixed_adapter: TestAdapter,
    config: WriteConfig,
    buffer: Vec<u8>,
) -> anyhow::Result<()> {
    prefixed_adapter.write("44-000001/invoice.pdf", &buffer, &config)?;

    let entries = prefixed_adapter.list_contents("", true)?;

    assert_that!(paths(&entries)).is_equal_to(vec!["44-000001", "44-000001/invoice.pdf"]);
    Ok(())
}
