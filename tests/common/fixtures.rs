//! Sample catalogue records.

pub const DUBLIN_CORE_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<csw:Record xmlns:csw="http://www.opengis.net/cat/csw/2.0.2" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dct="http://purl.org/dc/terms/" xmlns:ows="http://www.opengis.net/ows">
  <dc:identifier>urn:uuid:19887a8a-f6b0-4a63-ae56-7fba0e17801f</dc:identifier>
  <dc:type>http://purl.org/dc/dcmitype/Image</dc:type>
  <dc:format>image/svg+xml</dc:format>
  <dc:title>Lorem ipsum</dc:title>
  <dc:title>Dolor sit amet</dc:title>
  <dct:spatial>GR-22</dct:spatial>
  <dc:subject>Tourism--Greece</dc:subject>
  <dct:abstract>Quisque lacus diam, placerat mollis, pharetra in, commodo sed, augue.</dct:abstract>
  <dct:modified>2006-03-26</dct:modified>
  <ows:BoundingBox crs="urn:x-ogc:def:crs:EPSG:6.11:4326">
    <ows:LowerCorner>-4.1 -3.5</ows:LowerCorner>
    <ows:UpperCorner>12.0 22.2</ows:UpperCorner>
  </ows:BoundingBox>
</csw:Record>"#;

pub const ISO_RECORD: &str = r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco" xmlns:xlink="http://www.w3.org/1999/xlink">
  <gmd:fileIdentifier>
    <gco:CharacterString>3f342f64-9348-11df-ba6a-0014c2c00eab</gco:CharacterString>
  </gmd:fileIdentifier>
  <gmd:language>
    <gmd:LanguageCode codeList="http://www.loc.gov/standards/iso639-2/" codeListValue="eng">English</gmd:LanguageCode>
  </gmd:language>
  <gmd:contact xlink:href="http://example.org/contacts/1"/>
  <gmd:identificationInfo>
    <gmd:MD_DataIdentification>
      <gmd:citation>
        <gmd:CI_Citation>
          <gmd:title>
            <gco:CharacterString>Ocean Surface Temperature</gco:CharacterString>
          </gmd:title>
        </gmd:CI_Citation>
      </gmd:citation>
      <gmd:descriptiveKeywords>
        <gmd:MD_Keywords>
          <gmd:keyword><gco:CharacterString>oceans</gco:CharacterString></gmd:keyword>
          <gmd:keyword><gco:CharacterString>climate</gco:CharacterString></gmd:keyword>
        </gmd:MD_Keywords>
      </gmd:descriptiveKeywords>
    </gmd:MD_DataIdentification>
  </gmd:identificationInfo>
</gmd:MD_Metadata>"#;
