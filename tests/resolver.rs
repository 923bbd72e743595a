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

use cmis_fs::adapter::{FilesystemAdapter, NameEncoding, WriteConfig};
use cmis_fs::session::{Fileable, Folder};
use common::*;

mod common;

#[rstest]
fn existing_chain_is_not_recreated(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    adapter.create_dir("Clients", &config)?;
    adapter.create_dir("Clients/44-000001", &config)?;
    adapter.create_dir("Clients/44-000001/Invoices", &config)?;
    adapter.session_mut().clear();

    let folder = adapter.ensure_directory("Clients/44-000001/Invoices", &config)?;

    assert_that!(folder.name()).is_some().is_equal_to("Invoices");
    assert_that!(adapter.session().creations()).is_equal_to(0);
    assert_that!(adapter.session().lookups()).is_equal_to(3);
    Ok(())
}

#[rstest]
fn missing_chain_is_created_under_accumulated_parents(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    let folder = adapter.ensure_directory("Clients/44-000001/Invoices", &config)?;

    let session = adapter.session_mut();
    let root_id = session.root_id();
    let clients_id = session.id_of("/Clients");
    let client_id = session.id_of("/Clients/44-000001");

    assert_that!(session.created_folders()).is_equal_to(vec![
        (String::from("Clients"), root_id),
        (String::from("44-000001"), clients_id),
        (String::from("Invoices"), client_id.clone()),
    ]);
    assert_that!(folder.parent_id()).is_some().is_equal_to(&client_id);
    Ok(())
}

#[rstest]
fn partial_chain_creates_only_missing_folders(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    adapter.create_dir("Clients", &config)?;
    adapter.session_mut().clear();

    adapter.ensure_directory("Clients/44-000001/Invoices", &config)?;

    let created = adapter
        .session()
        .created_folders()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert_that!(created).is_equal_to(vec![
        String::from("44-000001"),
        String::from("Invoices"),
    ]);
    Ok(())
}

#[rstest]
fn root_is_resolved_without_lookups(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    let folder: Folder = adapter.ensure_directory("", &config)?;

    assert_that!(folder.is_root()).is_true();
    assert_that!(adapter.session().lookups()).is_equal_to(0);
    assert_that!(adapter.session().creations()).is_equal_to(0);
    Ok(())
}

#[rstest]
fn missing_folder_without_auto_create_errs(mut adapter: TestAdapter) {
    let config = WriteConfig::new().auto_create_directories(false);

    assert_that!(adapter.ensure_directory("Clients/44-000001", &config))
        .is_err_variant(cmis_fs::Error::NotFound(String::new()));
    assert_that!(adapter.session().creations()).is_equal_to(0);
}

#[rstest]
fn existing_folder_without_auto_create_is_looked_up_once(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    adapter.create_dir("Clients", &config)?;
    adapter.create_dir("Clients/44-000001", &config)?;
    adapter.session_mut().clear();

    let config = WriteConfig::new().auto_create_directories(false);
    let folder = adapter.ensure_directory("Clients/44-000001", &config)?;

    assert_that!(folder.path()).is_some().is_equal_to("/Clients/44-000001");
    assert_that!(adapter.session().lookups()).is_equal_to(1);
    Ok(())
}

#[rstest]
fn document_in_chain_errs(
    mut adapter: TestAdapter,
    config: WriteConfig,
    buffer: Vec<u8>,
) -> anyhow::Result<()> {
    adapter.write("Clients/invoice.pdf", &buffer, &config)?;

    assert_that!(adapter.ensure_directory("Clients/invoice.pdf/2020", &config))
        .is_err_variant(cmis_fs::Error::NotDirectory(String::new()));

    let config = WriteConfig::new().auto_create_directories(false);
    assert_that!(adapter.ensure_directory("Clients/invoice.pdf", &config))
        .is_err_variant(cmis_fs::Error::NotDirectory(String::new()));
    Ok(())
}

#[rstest]
fn directory_properties_are_set_on_created_folders(
    mut adapter: TestAdapter,
    buffer: Vec<u8>,
) -> anyhow::Result<()> {
    let config = WriteConfig::new()
        .property("cmis:description", "Invoice")
        .directory_property("cmis:description", "Client folder");

    adapter.write("Clients/44-000001/invoice.pdf", &buffer, &config)?;

    let folder = adapter.metadata("Clients/44-000001")?;
    let document = adapter.metadata("Clients/44-000001/invoice.pdf")?;

    assert_that!(folder.properties.get("cmis:description"))
        .is_some()
        .is_equal_to(&String::from("Client folder"));
    assert_that!(folder.properties.get("cmis:objectTypeId"))
        .is_some()
        .is_equal_to(&String::from("cmis:folder"));
    assert_that!(document.properties.get("cmis:description"))
        .is_some()
        .is_equal_to(&String::from("Invoice"));
    Ok(())
}

#[rstest]
fn folder_names_are_transliterated(
    mut adapter: TestAdapter,
    config: WriteConfig,
) -> anyhow::Result<()> {
    adapter.ensure_directory("Œuvres/Łukasz", &config)?;

    assert_that!(adapter.has("OEuvres/Lukasz")?).is_true();

    // The transliterated names are used to find existing folders.
    adapter.session_mut().clear();
    adapter.ensure_directory("Œuvres/Łukasz", &config)?;
    assert_that!(adapter.session().creations()).is_equal_to(0);
    Ok(())
}

#[rstest]
fn latin1_names_outside_repertoire_err(mut adapter: TestAdapter) {
    let config = WriteConfig::new().encoding(NameEncoding::Latin1);

    assert_that!(adapter.ensure_directory("Café", &config)).is_ok();
    assert_that!(adapter.ensure_directory("Œuvres", &config))
        .is_err_variant(cmis_fs::Error::InvalidName(String::new()));
}

#[rstest]
fn prefix_folders_are_created(mut prefixed_adapter: TestAdapter, config: WriteConfig) {
    assert_that!(prefixed_adapter.ensure_directory("44-000001", &config)).is_ok();

    let created = prefixed_adapter
        .session()
        .created_folders()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert_that!(created).is_equal_to(vec![
        String::from("TMS"),
        String::from("Clients"),
        String::from("44-000001"),
    ]);
}
